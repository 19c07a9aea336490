//! Catalog client trait and errors

use super::types::{CatalogRecord, SearchQuery};
use async_trait::async_trait;

/// Errors from catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog request timed out: {0}")]
    Timeout(String),
    #[error("catalog transport error: {0}")]
    Transport(String),
    #[error("catalog returned status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("catalog response could not be decoded: {0}")]
    Decode(String),
    #[error("invalid catalog URL: {0}")]
    InvalidUrl(String),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Client trait for the external book catalog.
///
/// Abstracts over transport (HTTP, mock) so the resolver and finder
/// don't depend on how the catalog is reached.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Resolve an identifier to its canonical record.
    ///
    /// `Ok(None)` means the identifier is unknown to the catalog.
    async fn fetch_canonical(&self, identifier: &str) -> CatalogResult<Option<CatalogRecord>>;

    /// Run a search, returning at most `limit` candidate records in the
    /// catalog's own ranking order.
    async fn search(&self, query: &SearchQuery, limit: usize) -> CatalogResult<Vec<CatalogRecord>>;
}
