//! Immutable tag-selection policy

use super::tag_key;
use crate::config::TagSettings;
use std::collections::HashSet;

/// Tables and constants that drive tag selection, fixed at construction.
#[derive(Debug, Clone)]
pub struct TagPolicy {
    max_tags: usize,
    semantic_threshold: f32,
    /// Lowercased region/era keywords
    region_keywords: Vec<String>,
    /// Lowercased, trimmed blocklist entries
    blocklist: HashSet<String>,
}

impl TagPolicy {
    pub const DEFAULT_MAX_TAGS: usize = 5;
    pub const DEFAULT_SEMANTIC_THRESHOLD: f32 = 0.50;

    pub fn new<R, B>(region_keywords: R, blocklist: B) -> Self
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
        B: IntoIterator,
        B::Item: AsRef<str>,
    {
        Self {
            max_tags: Self::DEFAULT_MAX_TAGS,
            semantic_threshold: Self::DEFAULT_SEMANTIC_THRESHOLD,
            region_keywords: region_keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            blocklist: blocklist
                .into_iter()
                .map(|b| tag_key(b.as_ref()))
                .filter(|b| !b.is_empty())
                .collect(),
        }
    }

    pub fn with_max_tags(mut self, max_tags: usize) -> Self {
        self.max_tags = max_tags;
        self
    }

    pub fn with_semantic_threshold(mut self, threshold: f32) -> Self {
        self.semantic_threshold = threshold;
        self
    }

    pub fn from_settings(settings: &TagSettings) -> Self {
        Self::new(&settings.region_keywords, &settings.blocklist)
            .with_max_tags(settings.max_tags)
            .with_semantic_threshold(settings.semantic_threshold)
    }

    pub fn max_tags(&self) -> usize {
        self.max_tags
    }

    pub fn semantic_threshold(&self) -> f32 {
        self.semantic_threshold
    }

    /// Whether any region/era keyword occurs in the subject, ignoring case.
    pub fn is_region_tag(&self, subject: &str) -> bool {
        let lower = subject.to_lowercase();
        self.region_keywords.iter().any(|k| lower.contains(k.as_str()))
    }

    /// Whether the subject exactly matches a blocklist entry, ignoring case.
    pub fn is_blocked(&self, subject: &str) -> bool {
        self.blocklist.contains(&tag_key(subject))
    }

    /// Whether a score clears the semantic bar.
    pub fn accepts_score(&self, score: f32) -> bool {
        score >= self.semantic_threshold
    }
}

impl Default for TagPolicy {
    fn default() -> Self {
        Self::from_settings(&TagSettings::default())
    }
}
