//! Mock catalog for testing — returns preconfigured records

use super::client::{CatalogClient, CatalogError, CatalogResult};
use super::types::{CatalogRecord, SearchQuery};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Mock catalog that answers from in-memory tables.
///
/// Unknown identifiers resolve to `Ok(None)` and unknown queries to an
/// empty result, like a catalog with no matches. Every search is recorded
/// so tests can assert on call order.
#[derive(Debug, Default)]
pub struct MockCatalog {
    available: bool,
    canonical: HashMap<String, CatalogRecord>,
    canonical_failures: HashSet<String>,
    searches: HashMap<SearchQuery, Vec<CatalogRecord>>,
    search_failures: HashSet<SearchQuery>,
    received: Mutex<Vec<(SearchQuery, usize)>>,
}

impl MockCatalog {
    /// Create a mock catalog that answers requests.
    pub fn new() -> Self {
        Self {
            available: true,
            ..Default::default()
        }
    }

    /// Create a mock catalog where every call fails with a transport error.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Register the canonical record for an identifier.
    pub fn with_canonical(mut self, identifier: impl Into<String>, record: CatalogRecord) -> Self {
        self.canonical.insert(identifier.into(), record);
        self
    }

    /// Make the canonical lookup for an identifier fail.
    pub fn with_canonical_failure(mut self, identifier: impl Into<String>) -> Self {
        self.canonical_failures.insert(identifier.into());
        self
    }

    /// Register results for a search.
    pub fn with_search(mut self, query: SearchQuery, records: Vec<CatalogRecord>) -> Self {
        self.searches.insert(query, records);
        self
    }

    /// Make a search fail.
    pub fn with_search_failure(mut self, query: SearchQuery) -> Self {
        self.search_failures.insert(query);
        self
    }

    /// Searches received so far, with the requested limit.
    pub fn received(&self) -> Vec<(SearchQuery, usize)> {
        self.received.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn unavailable_error() -> CatalogError {
        CatalogError::Transport("mock catalog configured as unavailable".to_string())
    }
}

#[async_trait]
impl CatalogClient for MockCatalog {
    async fn fetch_canonical(&self, identifier: &str) -> CatalogResult<Option<CatalogRecord>> {
        if !self.available {
            return Err(Self::unavailable_error());
        }
        if self.canonical_failures.contains(identifier) {
            return Err(CatalogError::Timeout(format!("mock failure for '{}'", identifier)));
        }
        Ok(self.canonical.get(identifier).cloned())
    }

    async fn search(&self, query: &SearchQuery, limit: usize) -> CatalogResult<Vec<CatalogRecord>> {
        if let Ok(mut received) = self.received.lock() {
            received.push((query.clone(), limit));
        }
        if !self.available {
            return Err(Self::unavailable_error());
        }
        if self.search_failures.contains(query) {
            return Err(CatalogError::Status {
                status: 503,
                url: format!("mock://search/{}", query),
            });
        }
        Ok(self
            .searches
            .get(query)
            .map(|records| records.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}
