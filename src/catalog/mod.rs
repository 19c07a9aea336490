//! Catalog access: canonical record lookup and candidate search
//!
//! The core only sees the `CatalogClient` trait. Two implementations:
//! - `OpenLibraryClient`: HTTP against the Open Library JSON API (production)
//! - `MockCatalog`: returns preconfigured records (testing)

mod client;
mod mock;
mod open_library;
mod types;

pub use client::{CatalogClient, CatalogError, CatalogResult};
pub use mock::MockCatalog;
pub use open_library::OpenLibraryClient;
pub use types::{BookRecord, CatalogRecord, SearchQuery};
