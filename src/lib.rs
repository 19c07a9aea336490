//! bookgraph: theme tags and a book similarity graph from one ISBN
//!
//! Given a book identifier, the catalog's raw subject headings are distilled
//! into a small set of theme tags, a few related books are found for each
//! tag, and everything is assembled into a bipartite book↔theme graph.
//!
//! # Core Concepts
//!
//! - **Tags**: bounded, ranked subset of a book's subjects (semantic themes
//!   first, then regions/eras, then backfill)
//! - **Related works**: vetted "Title by Author" labels found per tag
//! - **ThemeGraph**: book and theme nodes, edges only between the two kinds
//!
//! # Example
//!
//! ```
//! use bookgraph::{GraphAssembler, NodeKind};
//! use std::collections::HashMap;
//!
//! let graph = GraphAssembler::new().assemble("Norwegian Wood", &["Japan".to_string()], &HashMap::new());
//! assert_eq!(graph.kind_of("Japan"), Some(NodeKind::Theme));
//! ```

pub mod catalog;
pub mod config;
pub mod export;
mod graph;
pub mod pacing;
pub mod pipeline;
pub mod related;
pub mod semantic;
pub mod tags;

pub use catalog::{CatalogClient, CatalogError, CatalogRecord, MockCatalog, OpenLibraryClient, SearchQuery};
pub use config::{Config, ConfigError};
pub use export::ExportFormat;
pub use graph::{Edge, GraphAssembler, Node, NodeKind, ThemeGraph};
pub use pacing::{FixedPause, NoPause, Pacer};
pub use pipeline::{BookGraphPipeline, PipelineError, PipelineResult};
pub use related::RelatedWorkFinder;
pub use semantic::{EmbeddingScorer, LexicalEmbedder, SemanticScorer, ThemeVocabulary};
pub use tags::{TagPolicy, TagResolver, TagSet};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
