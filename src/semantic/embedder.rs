//! Embedding backends

use std::collections::HashMap;

/// Error type for embedding operations.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    /// The embedding model returned no results
    #[error("embedding returned no results")]
    EmptyResult,
    /// Model loading or inference failed
    #[error("embedding model error: {0}")]
    ModelError(String),
}

/// Trait for embedding text into vectors.
///
/// Implementations handle model loading and inference.
/// fastembed-rs for production, a lexical token index as the built-in fallback.
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts, returning one vector per text.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

/// Words that say a record is a book rather than what it is about.
const GENERIC_TERMS: &[&str] = &[
    "fiction", "novel", "novels", "story", "stories", "literature", "book", "books", "general",
    "works", "tales",
];

/// Weight of a generic term relative to a content word.
const GENERIC_WEIGHT: f32 = 0.25;

const STOPWORDS: &[&str] = &["a", "an", "and", "the", "of", "in", "on", "to", "for", "with"];

/// Deterministic bag-of-words embedder over a closed token index.
///
/// Every distinct content token of the theme vocabulary gets its own
/// dimension, so two texts only overlap when they share a vocabulary word.
/// Tokens outside the index contribute nothing; a subject with no
/// vocabulary word embeds to the zero vector and scores 0.0 everywhere.
/// Generic book words are down-weighted so that a bare "fiction" does not
/// match every "... fiction" theme. The vector is L2-normalised.
#[derive(Debug, Clone)]
pub struct LexicalEmbedder {
    index: HashMap<String, usize>,
}

impl LexicalEmbedder {
    /// Build the token index from theme phrases, in first-seen order.
    pub fn from_vocabulary<S: AsRef<str>>(phrases: &[S]) -> Self {
        let mut index = HashMap::new();
        for token in phrases.iter().flat_map(|p| tokens(p.as_ref())) {
            let next = index.len();
            index.entry(token).or_insert(next);
        }
        Self { index }
    }

    /// Number of dimensions (distinct vocabulary tokens).
    pub fn dimensions(&self) -> usize {
        self.index.len()
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0_f32; self.index.len()];
        for token in tokens(text) {
            let Some(&slot) = self.index.get(&token) else {
                continue;
            };
            vector[slot] += if GENERIC_TERMS.contains(&token.as_str()) {
                GENERIC_WEIGHT
            } else {
                1.0
            };
        }

        let magnitude: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for v in &mut vector {
                *v /= magnitude;
            }
        }
        vector
    }
}

impl Default for LexicalEmbedder {
    /// Indexed over the built-in theme vocabulary.
    fn default() -> Self {
        Self::from_vocabulary(crate::config::defaults::THEME_VOCABULARY)
    }
}

impl Embedder for LexicalEmbedder {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

/// Lowercased content tokens with a light plural fold.
fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .filter(|t| !STOPWORDS.contains(&t.as_str()))
        .map(|t| {
            if GENERIC_TERMS.contains(&t.as_str()) {
                t
            } else if t.len() > 3 && t.ends_with('s') && !t.ends_with("ss") {
                t[..t.len() - 1].to_string()
            } else {
                t
            }
        })
}

// ---------------------------------------------------------------------------
// FastEmbedEmbedder — production embedder behind `embeddings` feature
// ---------------------------------------------------------------------------

#[cfg(feature = "embeddings")]
mod fastembed_impl {
    use super::{Embedder, EmbeddingError};
    use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
    use std::sync::Mutex;

    /// Production embedder backed by fastembed (ONNX Runtime).
    ///
    /// Wraps `fastembed::TextEmbedding` in a `Mutex` because its `embed`
    /// method requires `&mut self`, while the `Embedder` trait uses `&self`.
    pub struct FastEmbedEmbedder {
        model: Mutex<TextEmbedding>,
    }

    impl FastEmbedEmbedder {
        /// Create a new FastEmbedEmbedder with a specific model.
        pub fn new(model: EmbeddingModel) -> Result<Self, EmbeddingError> {
            let options = InitOptions::new(model).with_show_download_progress(false);
            let embedding = TextEmbedding::try_new(options)
                .map_err(|e| EmbeddingError::ModelError(e.to_string()))?;
            Ok(Self {
                model: Mutex::new(embedding),
            })
        }

        /// Create a new FastEmbedEmbedder with the default model (all-MiniLM-L6-v2).
        pub fn default_model() -> Result<Self, EmbeddingError> {
            Self::new(EmbeddingModel::AllMiniLML6V2)
        }
    }

    impl Embedder for FastEmbedEmbedder {
        fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            if texts.is_empty() {
                return Ok(Vec::new());
            }
            let mut model = self
                .model
                .lock()
                .map_err(|_| EmbeddingError::ModelError("embedding model lock poisoned".to_string()))?;
            let embeddings = model
                .embed(texts.to_vec(), None)
                .map_err(|e| EmbeddingError::ModelError(e.to_string()))?;
            if embeddings.is_empty() {
                return Err(EmbeddingError::EmptyResult);
            }
            Ok(embeddings)
        }
    }
}

#[cfg(feature = "embeddings")]
pub use fastembed_impl::FastEmbedEmbedder;
