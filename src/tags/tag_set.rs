//! Bounded, case-insensitively distinct tag sequence

use super::tag_key;
use std::collections::HashSet;

/// An ordered set of at most `capacity` tags.
///
/// Distinctness is by trimmed, case-insensitive comparison; the first
/// spelling pushed is the one kept. Order is presentation priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
    keys: HashSet<String>,
    capacity: usize,
}

impl TagSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tags: Vec::with_capacity(capacity),
            keys: HashSet::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a tag unless the set is full, the tag is blank, or an
    /// equivalent tag is already present. Returns whether it was added.
    pub fn push(&mut self, tag: &str) -> bool {
        if self.is_full() {
            return false;
        }
        let key = tag_key(tag);
        if key.is_empty() || !self.keys.insert(key) {
            return false;
        }
        self.tags.push(tag.trim().to_string());
        true
    }

    pub fn is_full(&self) -> bool {
        self.tags.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.keys.contains(&tag_key(tag))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tags
    }
}
