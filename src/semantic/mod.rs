//! Semantic scoring of subject strings against the theme vocabulary
//!
//! Uses a trait-based embedding backend (`Embedder`) so production code can
//! use fastembed-rs while tests use deterministic keyword embedders.

mod embedder;
mod scorer;
mod vocabulary;

pub use embedder::{Embedder, EmbeddingError, LexicalEmbedder};
#[cfg(feature = "embeddings")]
pub use embedder::FastEmbedEmbedder;
pub use scorer::{cosine_similarity, EmbeddingScorer, SemanticScorer};
pub use vocabulary::{ThemeMatch, ThemeVocabulary};
