//! RelatedWorkFinder: one tag → a few vetted "Title by Author" labels
//!
//! Two searches per tag, in fixed order: subject-scoped first, free-text
//! second. The second runs only when the first leaves the quota unfilled.
//! Each candidate is screened against the source book, earlier picks,
//! edition count, and soft genre alignment.

use crate::catalog::{BookRecord, CatalogClient, SearchQuery};
use crate::pacing::Pacer;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Why a candidate was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Same title as the book the graph is rooted at
    SourceBook,
    /// Title already accepted earlier in this call
    Duplicate,
    /// No recorded editions
    NoEditions,
    /// Subject text contradicts the fiction hint
    GenreMismatch,
}

/// Finds related books for a tag through the catalog.
pub struct RelatedWorkFinder {
    catalog: Arc<dyn CatalogClient>,
    pacer: Arc<dyn Pacer>,
    overfetch: usize,
}

impl RelatedWorkFinder {
    pub const DEFAULT_OVERFETCH: usize = 12;

    pub fn new(catalog: Arc<dyn CatalogClient>, pacer: Arc<dyn Pacer>) -> Self {
        Self {
            catalog,
            pacer,
            overfetch: Self::DEFAULT_OVERFETCH,
        }
    }

    /// Extra candidates requested per search to absorb filtering loss.
    pub fn with_overfetch(mut self, overfetch: usize) -> Self {
        self.overfetch = overfetch;
        self
    }

    /// Up to `max_results` labels for books related to `tag`.
    ///
    /// Never returns the excluded title or the same title twice. Catalog
    /// failures degrade to fewer (possibly zero) results.
    pub async fn find(
        &self,
        tag: &str,
        exclude_title_lower: &str,
        is_fiction_hint: bool,
        max_results: usize,
    ) -> Vec<String> {
        let mut accepted = Vec::new();
        if max_results == 0 {
            return accepted;
        }

        let exclude = exclude_title_lower.trim().to_lowercase();
        let limit = max_results.saturating_add(self.overfetch);
        let mut seen_titles = HashSet::new();

        let queries = [
            SearchQuery::Subject(tag.to_string()),
            SearchQuery::FreeText(tag.to_string()),
        ];
        for (i, query) in queries.iter().enumerate() {
            if accepted.len() >= max_results {
                break;
            }
            if i > 0 {
                self.pacer.pause().await;
            }

            let records = match self.catalog.search(query, limit).await {
                Ok(records) => records,
                Err(e) => {
                    warn!(query = %query, error = %e, "catalog search failed; no candidates from it");
                    continue;
                }
            };

            for record in &records {
                if accepted.len() >= max_results {
                    break;
                }
                let book = BookRecord::from(record);
                match screen(&book, &exclude, &seen_titles, is_fiction_hint) {
                    Ok(()) => {
                        seen_titles.insert(title_key(&book.title));
                        accepted.push(book.label());
                    }
                    Err(reason) => {
                        debug!(title = %book.title, ?reason, query = %query, "candidate rejected");
                    }
                }
            }
        }

        debug!(tag, found = accepted.len(), "related works resolved");
        accepted
    }
}

/// Check one candidate against the acceptance rules, in order.
pub fn screen(
    book: &BookRecord,
    exclude_title_lower: &str,
    seen_titles: &HashSet<String>,
    is_fiction_hint: bool,
) -> Result<(), Rejection> {
    let key = title_key(&book.title);
    if key == exclude_title_lower {
        return Err(Rejection::SourceBook);
    }
    if seen_titles.contains(&key) {
        return Err(Rejection::Duplicate);
    }
    if book.edition_count < 1 {
        return Err(Rejection::NoEditions);
    }
    if !book.subject_text.is_empty() && !genre_aligned(&book.subject_text, is_fiction_hint) {
        return Err(Rejection::GenreMismatch);
    }
    Ok(())
}

fn genre_aligned(subject_text: &str, is_fiction_hint: bool) -> bool {
    let text = subject_text.to_lowercase();
    let mentions_fiction = text.contains("fiction");
    if is_fiction_hint {
        mentions_fiction || text.contains("novel")
    } else {
        !mentions_fiction
    }
}

fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogRecord, MockCatalog};
    use crate::pacing::NoPause;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Pacer that counts pauses instead of sleeping.
    #[derive(Default)]
    struct CountingPacer(AtomicUsize);

    #[async_trait]
    impl Pacer for CountingPacer {
        async fn pause(&self) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn subject(tag: &str) -> SearchQuery {
        SearchQuery::Subject(tag.to_string())
    }

    fn free_text(tag: &str) -> SearchQuery {
        SearchQuery::FreeText(tag.to_string())
    }

    fn book(title: &str, author: &str, editions: u32, subjects: &[&str]) -> CatalogRecord {
        CatalogRecord::new(title)
            .with_author(author)
            .with_edition_count(editions)
            .with_subjects(subjects.iter().copied())
    }

    fn finder(catalog: MockCatalog) -> (RelatedWorkFinder, Arc<MockCatalog>) {
        let catalog = Arc::new(catalog);
        let finder = RelatedWorkFinder::new(catalog.clone(), Arc::new(NoPause));
        (finder, catalog)
    }

    #[tokio::test]
    async fn grief_scenario_rejects_self_match_and_zero_editions() {
        let (finder, _) = finder(MockCatalog::new().with_search(
            subject("grief"),
            vec![
                book("The Year of Magical Thinking", "Joan Didion", 40, &[]),
                book("Some Other Grief Book", "A. Writer", 0, &[]),
            ],
        ));
        let results = finder
            .find("grief", "the year of magical thinking", false, 3)
            .await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn formats_title_by_author_with_unknown_default() {
        let (finder, _) = finder(MockCatalog::new().with_search(
            subject("grief"),
            vec![
                book("A Grief Observed", "C. S. Lewis", 12, &[]),
                CatalogRecord::new("H is for Hawk").with_edition_count(5),
            ],
        ));
        let results = finder.find("grief", "root", false, 3).await;
        assert_eq!(results, vec!["A Grief Observed by C. S. Lewis", "H is for Hawk by Unknown"]);
    }

    #[tokio::test]
    async fn second_query_skipped_when_first_fills_quota() {
        let pacer = Arc::new(CountingPacer::default());
        let catalog = Arc::new(MockCatalog::new().with_search(
            subject("war"),
            vec![book("A", "x", 1, &[]), book("B", "y", 1, &[])],
        ));
        let finder = RelatedWorkFinder::new(catalog.clone(), pacer.clone());

        let results = finder.find("war", "root", false, 2).await;
        assert_eq!(results.len(), 2);
        assert_eq!(catalog.received(), vec![(subject("war"), 14)]);
        assert_eq!(pacer.0.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn second_query_fills_remainder_after_a_pause() {
        let pacer = Arc::new(CountingPacer::default());
        let catalog = Arc::new(
            MockCatalog::new()
                .with_search(subject("war"), vec![book("A", "x", 1, &[])])
                .with_search(
                    free_text("war"),
                    vec![book("a", "x", 3, &[]), book("B", "y", 1, &[]), book("C", "z", 1, &[])],
                ),
        );
        let finder = RelatedWorkFinder::new(catalog.clone(), pacer.clone()).with_overfetch(0);

        let results = finder.find("war", "root", false, 2).await;
        assert_eq!(results, vec!["A by x", "B by y"], "cross-query duplicate skipped");
        assert_eq!(
            catalog.received(),
            vec![(subject("war"), 2), (free_text("war"), 2)]
        );
        assert_eq!(pacer.0.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn never_exceeds_max_results() {
        let records: Vec<CatalogRecord> = (0..10).map(|i| book(&format!("T{}", i), "a", 1, &[])).collect();
        let (finder, _) = finder(MockCatalog::new().with_search(subject("sea"), records));
        assert_eq!(finder.find("sea", "root", false, 3).await.len(), 3);
        assert!(finder.find("sea", "root", false, 0).await.is_empty());
    }

    #[tokio::test]
    async fn huge_overfetch_saturates_the_search_limit() {
        let catalog = Arc::new(
            MockCatalog::new().with_search(subject("sea"), vec![book("Moby-Dick", "Herman Melville", 9, &[])]),
        );
        let finder = RelatedWorkFinder::new(catalog.clone(), Arc::new(NoPause)).with_overfetch(usize::MAX);

        let results = finder.find("sea", "root", false, 3).await;
        assert_eq!(results, vec!["Moby-Dick by Herman Melville"]);
        assert_eq!(catalog.received()[0], (subject("sea"), usize::MAX));
    }

    #[tokio::test]
    async fn fiction_hint_requires_fiction_or_novel() {
        let (finder, _) = finder(MockCatalog::new().with_search(
            subject("love"),
            vec![
                book("Cookbook", "a", 2, &["Cooking"]),
                book("Romance", "b", 2, &["Love stories", "Fiction"]),
                book("Epistolary", "c", 2, &["Novels in letters"]),
                book("Unlabelled", "d", 2, &[]),
            ],
        ));
        let results = finder.find("love", "root", true, 5).await;
        assert_eq!(results, vec!["Romance by b", "Epistolary by c", "Unlabelled by d"]);
    }

    #[tokio::test]
    async fn non_fiction_hint_rejects_fiction() {
        let (finder, _) = finder(MockCatalog::new().with_search(
            subject("love"),
            vec![
                book("Romance", "b", 2, &["Love stories", "Fiction"]),
                book("Essays", "c", 2, &["Love", "Philosophy"]),
            ],
        ));
        let results = finder.find("love", "root", false, 5).await;
        assert_eq!(results, vec!["Essays by c"]);
    }

    #[tokio::test]
    async fn failed_first_query_falls_through_to_second() {
        let (finder, _) = finder(
            MockCatalog::new()
                .with_search_failure(subject("grief"))
                .with_search(free_text("grief"), vec![book("A Grief Observed", "C. S. Lewis", 9, &[])]),
        );
        let results = finder.find("grief", "root", false, 3).await;
        assert_eq!(results, vec!["A Grief Observed by C. S. Lewis"]);
    }

    #[tokio::test]
    async fn unreachable_catalog_yields_empty() {
        let (finder, _) = finder(MockCatalog::unavailable());
        assert!(finder.find("grief", "root", false, 3).await.is_empty());
    }

    #[test]
    fn screen_checks_in_order() {
        let seen: HashSet<String> = ["dup".to_string()].into_iter().collect();
        let b = |title: &str, editions: u32, subjects: &str| BookRecord {
            title: title.to_string(),
            author: "a".to_string(),
            edition_count: editions,
            subject_text: subjects.to_string(),
        };
        assert_eq!(screen(&b("Root", 0, ""), "root", &seen, false), Err(Rejection::SourceBook));
        assert_eq!(screen(&b("DUP", 1, ""), "root", &seen, false), Err(Rejection::Duplicate));
        assert_eq!(screen(&b("New", 0, ""), "root", &seen, false), Err(Rejection::NoEditions));
        assert_eq!(
            screen(&b("New", 1, "Science fiction"), "root", &seen, false),
            Err(Rejection::GenreMismatch)
        );
        assert_eq!(screen(&b("New", 1, "History"), "root", &seen, false), Ok(()));
    }
}
