//! Catalog record types

use serde::{Deserialize, Serialize};

/// A record as returned by the catalog, either from a canonical lookup or
/// from a search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub title: String,
    /// Free-text subject headings
    #[serde(default)]
    pub subjects: Vec<String>,
    /// Author names; may be empty
    #[serde(default)]
    pub author_name: Vec<String>,
    #[serde(default)]
    pub edition_count: u32,
}

impl CatalogRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_subjects<S: Into<String>>(mut self, subjects: impl IntoIterator<Item = S>) -> Self {
        self.subjects = subjects.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author_name.push(author.into());
        self
    }

    pub fn with_edition_count(mut self, count: u32) -> Self {
        self.edition_count = count;
        self
    }
}

/// A search with its query semantics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SearchQuery {
    /// Match records filed under this subject heading
    Subject(String),
    /// Free-text match over the whole record
    FreeText(String),
}

impl SearchQuery {
    /// The raw query text
    pub fn text(&self) -> &str {
        match self {
            SearchQuery::Subject(t) | SearchQuery::FreeText(t) => t,
        }
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchQuery::Subject(t) => write!(f, "subject:{}", t),
            SearchQuery::FreeText(t) => write!(f, "q:{}", t),
        }
    }
}

/// Placeholder author for records without one
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A search candidate flattened for filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    pub edition_count: u32,
    /// The record's subjects joined with ", "; empty when the catalog has none
    pub subject_text: String,
}

impl BookRecord {
    /// Display label used as the graph node identity
    pub fn label(&self) -> String {
        format!("{} by {}", self.title, self.author)
    }
}

impl From<&CatalogRecord> for BookRecord {
    fn from(record: &CatalogRecord) -> Self {
        Self {
            title: record.title.clone(),
            author: record
                .author_name
                .first()
                .cloned()
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            edition_count: record.edition_count,
            subject_text: record.subjects.join(", "),
        }
    }
}
