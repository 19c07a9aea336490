//! ThemeGraph: the bipartite output artifact

use super::edge::Edge;
use super::node::{Node, NodeKind};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A bipartite graph of books and themes rooted at one book.
///
/// Nodes keep insertion order so exports are stable. A display string maps
/// to exactly one node; once registered, a label keeps its kind.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeGraph {
    /// Display string of the root book
    root: String,
    /// Nodes in insertion order
    nodes: Vec<Node>,
    /// Edges in insertion order
    edges: Vec<Edge>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    #[serde(skip)]
    edge_set: HashSet<Edge>,
}

impl ThemeGraph {
    /// Create a graph holding only the root book node
    pub fn new(root: impl Into<String>) -> Self {
        let root = root.into();
        let mut graph = Self {
            root: root.clone(),
            nodes: Vec::new(),
            edges: Vec::new(),
            index: HashMap::new(),
            edge_set: HashSet::new(),
        };
        graph.insert(Node::book(root));
        graph
    }

    /// The root book's display string
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Register a theme node.
    ///
    /// Returns `true` if `label` is a theme node after the call, `false` if
    /// the label is already taken by a book.
    pub fn add_theme(&mut self, label: &str) -> bool {
        self.ensure(label, NodeKind::Theme)
    }

    /// Register a book node.
    ///
    /// Returns `true` if `label` is a book node after the call, `false` if
    /// the label is already taken by a theme.
    pub fn add_book(&mut self, label: &str) -> bool {
        self.ensure(label, NodeKind::Book)
    }

    /// Connect an existing book to an existing theme.
    ///
    /// Returns `true` only when a new edge was added. Missing endpoints,
    /// endpoints of the wrong kind, and repeated pairs are ignored.
    pub fn link(&mut self, book: &str, theme: &str) -> bool {
        if self.kind_of(book) != Some(NodeKind::Book) || self.kind_of(theme) != Some(NodeKind::Theme) {
            return false;
        }
        let edge = Edge::new(book, theme);
        if !self.edge_set.insert(edge.clone()) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    /// Get a node by display string
    pub fn node(&self, label: &str) -> Option<&Node> {
        self.index.get(label).map(|&i| &self.nodes[i])
    }

    /// Kind of the node with the given label, if present
    pub fn kind_of(&self, label: &str) -> Option<NodeKind> {
        self.node(label).map(|n| n.kind)
    }

    /// Check if a node with this label exists
    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// All edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Theme labels in insertion order
    pub fn themes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter(|n| n.is_theme()).map(|n| n.label.as_str())
    }

    /// Books linked to a theme, excluding the root
    pub fn books_for_theme<'a>(&'a self, theme: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.theme == theme && e.book != self.root)
            .map(|e| e.book.as_str())
    }

    /// Themes linked to a book
    pub fn themes_for_book<'a>(&'a self, book: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.book == book)
            .map(|e| e.theme.as_str())
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn ensure(&mut self, label: &str, kind: NodeKind) -> bool {
        match self.kind_of(label) {
            Some(existing) => existing == kind,
            None => {
                self.insert(Node { label: label.to_string(), kind });
                true
            }
        }
    }

    fn insert(&mut self, node: Node) {
        self.index.insert(node.label.clone(), self.nodes.len());
        self.nodes.push(node);
    }
}
