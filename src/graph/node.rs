//! Node representation in the theme graph

use serde::{Deserialize, Serialize};

/// The two node kinds of the bipartite graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A book: the root title or a "Title by Author" label
    Book,
    /// A theme tag
    Theme,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Book => write!(f, "book"),
            NodeKind::Theme => write!(f, "theme"),
        }
    }
}

/// A node in the theme graph.
///
/// Identity is the display string: two nodes with the same label are the
/// same node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Display string (title, "Title by Author", or tag)
    pub label: String,
    /// Book or theme
    pub kind: NodeKind,
}

impl Node {
    /// Create a book node
    pub fn book(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: NodeKind::Book,
        }
    }

    /// Create a theme node
    pub fn theme(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: NodeKind::Theme,
        }
    }

    pub fn is_book(&self) -> bool {
        self.kind == NodeKind::Book
    }

    pub fn is_theme(&self) -> bool {
        self.kind == NodeKind::Theme
    }
}
