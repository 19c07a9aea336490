//! Edge representation: always book ↔ theme

use serde::{Deserialize, Serialize};

/// An undirected, unweighted edge between a book and a theme.
///
/// The two endpoints are typed by position, so a book–book or theme–theme
/// edge cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Label of the book endpoint
    pub book: String,
    /// Label of the theme endpoint
    pub theme: String,
}

impl Edge {
    /// Create a new edge
    pub fn new(book: impl Into<String>, theme: impl Into<String>) -> Self {
        Self {
            book: book.into(),
            theme: theme.into(),
        }
    }
}
