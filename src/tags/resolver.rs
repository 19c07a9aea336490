//! TagResolver: raw catalog subjects → TagSet
//!
//! Selection runs in priority tiers, each appending into the same bounded
//! set until it is full:
//! 1. semantic tags (non-blocked, best vocabulary score at or above threshold)
//! 2. region/era tags (a keyword occurs in the subject)
//! 3. any remaining non-blocked subject, in catalog order
//! 4. blocked subjects, only when the first three tiers selected nothing
//!
//! Tiers 3 and 4 guarantee a non-empty result whenever any subject exists.

use super::policy::TagPolicy;
use super::tag_key;
use super::tag_set::TagSet;
use crate::semantic::{SemanticScorer, ThemeVocabulary};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A raw subject annotated for selection.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateTag {
    /// Trimmed subject text, original casing
    pub subject: String,
    /// Best similarity against the theme vocabulary; 0.0 when blocked or
    /// when scoring failed
    pub semantic_score: f32,
    pub is_region_tag: bool,
    pub is_blocked: bool,
}

/// Converts a catalog record's subjects into a bounded, ranked tag set.
pub struct TagResolver {
    scorer: Arc<dyn SemanticScorer>,
    vocabulary: ThemeVocabulary,
    policy: TagPolicy,
}

impl TagResolver {
    /// `vocabulary` must have been embedded with `scorer`.
    pub fn new(scorer: Arc<dyn SemanticScorer>, vocabulary: ThemeVocabulary, policy: TagPolicy) -> Self {
        Self {
            scorer,
            vocabulary,
            policy,
        }
    }

    pub fn policy(&self) -> &TagPolicy {
        &self.policy
    }

    /// Annotate subjects, collapsing case-only duplicates onto their first
    /// occurrence and dropping blank entries.
    pub fn candidates<S: AsRef<str>>(&self, raw_subjects: &[S]) -> Vec<CandidateTag> {
        let mut seen = HashSet::new();
        raw_subjects
            .iter()
            .map(|s| s.as_ref().trim())
            .filter(|s| !s.is_empty() && seen.insert(tag_key(s)))
            .map(|subject| {
                let is_blocked = self.policy.is_blocked(subject);
                CandidateTag {
                    subject: subject.to_string(),
                    semantic_score: if is_blocked { 0.0 } else { self.score(subject) },
                    is_region_tag: self.policy.is_region_tag(subject),
                    is_blocked,
                }
            })
            .collect()
    }

    /// Resolve subjects into at most `max_tags` distinct tags.
    ///
    /// Empty input yields an empty set.
    pub fn resolve<S: AsRef<str>>(&self, raw_subjects: &[S]) -> TagSet {
        let candidates = self.candidates(raw_subjects);
        let mut tags = TagSet::with_capacity(self.policy.max_tags());

        let semantic = candidates
            .iter()
            .filter(|c| !c.is_blocked && self.policy.accepts_score(c.semantic_score));
        let region = candidates.iter().filter(|c| c.is_region_tag);
        let unblocked = candidates.iter().filter(|c| !c.is_blocked);

        for (tier, group) in [
            ("semantic", semantic.collect::<Vec<_>>()),
            ("region", region.collect()),
            ("backfill", unblocked.collect()),
        ] {
            Self::fill(&mut tags, tier, group);
        }
        if tags.is_empty() {
            let blocked = candidates.iter().filter(|c| c.is_blocked).collect();
            Self::fill(&mut tags, "blocked-backfill", blocked);
        }

        info!(
            subjects = candidates.len(),
            selected = tags.len(),
            "resolved tags"
        );
        tags
    }

    fn fill(tags: &mut TagSet, tier: &str, group: Vec<&CandidateTag>) {
        for candidate in group {
            if tags.is_full() {
                break;
            }
            if tags.push(&candidate.subject) {
                debug!(tag = %candidate.subject, tier, score = candidate.semantic_score, "tag selected");
            }
        }
    }

    /// Best vocabulary score for a subject; failures score 0.0.
    fn score(&self, subject: &str) -> f32 {
        match self.scorer.embed(subject) {
            Ok(vector) => self
                .vocabulary
                .best_match(&vector, self.scorer.as_ref())
                .map_or(0.0, |m| m.score),
            Err(e) => {
                warn!(subject, error = %e, "subject could not be scored; treated as 0.0");
                0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::{cosine_similarity, EmbeddingError, EmbeddingScorer, LexicalEmbedder};
    use proptest::prelude::*;

    /// One axis per keyword; "broken" fails to embed.
    struct KeywordScorer {
        axes: Vec<&'static str>,
    }

    impl KeywordScorer {
        fn new() -> Self {
            Self {
                axes: vec!["love", "psychological", "war", "grief", "sea"],
            }
        }
    }

    impl SemanticScorer for KeywordScorer {
        fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            let t = text.to_lowercase();
            if t.contains("broken") {
                return Err(EmbeddingError::ModelError("broken input".into()));
            }
            Ok(self
                .axes
                .iter()
                .map(|axis| if t.contains(axis) { 1.0 } else { 0.0 })
                .collect())
        }

        fn similarity(&self, a: &[f32], b: &[f32]) -> f32 {
            cosine_similarity(a, b)
        }
    }

    fn resolver_with(policy: TagPolicy) -> TagResolver {
        let scorer: Arc<dyn SemanticScorer> = Arc::new(KeywordScorer::new());
        let vocabulary = ThemeVocabulary::embed(
            &["love stories", "psychological fiction", "war", "grief"],
            scorer.as_ref(),
        )
        .unwrap();
        TagResolver::new(scorer, vocabulary, policy)
    }

    fn resolver() -> TagResolver {
        resolver_with(TagPolicy::new(["Japan", "France"], ["Fiction", "Accessible book"]))
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn japan_scenario_keeps_region_and_drops_blocked() {
        let tags = resolver().resolve(&["Fiction", "Love stories", "Japan", "Psychological fiction"]);
        assert_eq!(
            tags.into_vec(),
            strings(&["Love stories", "Psychological fiction", "Japan"])
        );
    }

    #[test]
    fn empty_subjects_yield_empty_set() {
        let tags = resolver().resolve::<&str>(&[]);
        assert!(tags.is_empty());
    }

    #[test]
    fn whitespace_only_subjects_yield_empty_set() {
        let tags = resolver().resolve(&["  ", "\t", ""]);
        assert!(tags.is_empty());
    }

    #[test]
    fn semantic_tags_come_before_region_tags() {
        let tags = resolver().resolve(&["Japan", "War stories"]);
        assert_eq!(tags.into_vec(), strings(&["War stories", "Japan"]));
    }

    #[test]
    fn case_duplicates_collapse_to_first_spelling() {
        let tags = resolver().resolve(&["love stories", "Love Stories", "LOVE STORIES"]);
        assert_eq!(tags.into_vec(), strings(&["love stories"]));
    }

    #[test]
    fn subject_both_region_and_semantic_counted_once() {
        let tags = resolver().resolve(&["War -- France"]);
        assert_eq!(tags.into_vec(), strings(&["War -- France"]));
    }

    #[test]
    fn capped_at_max_tags() {
        let policy = TagPolicy::new(["Japan"], Vec::<String>::new()).with_max_tags(2);
        let tags = resolver_with(policy).resolve(&["love", "war", "grief", "Japan"]);
        assert_eq!(tags.into_vec(), strings(&["love", "war"]));
    }

    #[test]
    fn unscored_subjects_backfill_in_catalog_order() {
        let tags = resolver().resolve(&["Cooking", "Gardening"]);
        assert_eq!(tags.into_vec(), strings(&["Cooking", "Gardening"]));
    }

    #[test]
    fn only_blocked_subjects_still_yield_a_tag() {
        let tags = resolver().resolve(&["Fiction", "Accessible book"]);
        assert_eq!(tags.into_vec(), strings(&["Fiction", "Accessible book"]));
    }

    #[test]
    fn blocked_subjects_unused_when_others_selected() {
        let tags = resolver().resolve(&["Fiction", "Cooking", "Grief"]);
        assert_eq!(tags.into_vec(), strings(&["Grief", "Cooking"]));
    }

    #[test]
    fn scoring_failure_is_treated_as_zero() {
        let r = resolver();
        let candidates = r.candidates(&["broken love"]);
        assert_eq!(candidates[0].semantic_score, 0.0);
        // still reachable through backfill
        assert_eq!(r.resolve(&["broken love"]).into_vec(), strings(&["broken love"]));
    }

    #[test]
    fn candidates_annotate_flags() {
        let candidates = resolver().candidates(&["Fiction", "Japan", "  ", "Love stories"]);
        assert_eq!(candidates.len(), 3);
        assert!(candidates[0].is_blocked);
        assert_eq!(candidates[0].semantic_score, 0.0);
        assert!(candidates[1].is_region_tag);
        assert!(candidates[2].semantic_score >= 0.5);
    }

    #[test]
    fn default_tables_with_lexical_embedder_reject_bare_fiction() {
        let scorer: Arc<dyn SemanticScorer> =
            Arc::new(EmbeddingScorer::new(Box::new(LexicalEmbedder::default())));
        let settings = crate::config::TagSettings::default();
        let vocabulary = ThemeVocabulary::embed(&settings.theme_vocabulary, scorer.as_ref()).unwrap();
        // Blocklist emptied so only the semantic bar decides
        let policy = TagPolicy::new(&settings.region_keywords, Vec::<String>::new());
        let r = TagResolver::new(scorer, vocabulary, policy);

        let candidates = r.candidates(&["fiction", "Unrequited love"]);
        assert!(candidates[0].semantic_score < 0.5, "bare genre label");
        assert!(candidates[1].semantic_score >= 0.5, "specific theme");

        let off_theme = [
            "Juvenile fiction", "Accessible book", "Birds", "Beer", "Cars", "Economics",
        ];
        for c in r.candidates(&off_theme) {
            assert!(c.semantic_score < 0.5, "{} scored {}", c.subject, c.semantic_score);
        }
        let tags = r.resolve(&["Fiction", "Accessible book", "Juvenile fiction", "Grief"]);
        assert_eq!(tags.iter().next(), Some("Grief"), "only the real theme leads");
    }

    fn subject_strategy() -> impl Strategy<Value = Vec<String>> {
        let pool = prop::sample::select(vec![
            "Fiction", "fiction", "Love stories", "love Stories", "Japan", "Japan -- History",
            "France", "War", "Grief", "Cooking", "Accessible book", "Sea stories", "  ",
            "Psychological fiction", "Gardening", "Chess",
        ]);
        prop::collection::vec(pool.prop_map(String::from), 0..12)
    }

    proptest! {
        #[test]
        fn tag_set_is_bounded_and_distinct(subjects in subject_strategy()) {
            let tags = resolver().resolve(&subjects).into_vec();
            prop_assert!(tags.len() <= TagPolicy::DEFAULT_MAX_TAGS);
            let keys: HashSet<String> = tags.iter().map(|t| t.to_lowercase()).collect();
            prop_assert_eq!(keys.len(), tags.len());
        }

        #[test]
        fn non_blank_input_yields_non_empty_tags(subjects in subject_strategy()) {
            let tags = resolver().resolve(&subjects);
            let has_content = subjects.iter().any(|s| !s.trim().is_empty());
            prop_assert_eq!(!tags.is_empty(), has_content);
        }

        #[test]
        fn region_tags_survive_when_room_remains(subjects in subject_strategy()) {
            let r = resolver();
            let candidates = r.candidates(&subjects);
            let is_semantic =
                |c: &CandidateTag| !c.is_blocked && r.policy().accepts_score(c.semantic_score);
            let semantic = candidates.iter().filter(|c| is_semantic(c)).count();
            let tags = r.resolve(&subjects);
            let mut room = TagPolicy::DEFAULT_MAX_TAGS.saturating_sub(semantic);
            for c in candidates.iter().filter(|c| c.is_region_tag && !is_semantic(c)) {
                if tags.contains(&c.subject) {
                    room = room.saturating_sub(1);
                    continue;
                }
                prop_assert!(room == 0, "region tag {} dropped with room left", c.subject);
            }
        }
    }
}
