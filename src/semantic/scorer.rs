//! SemanticScorer: the "text → vector" and "vector, vector → score" oracle

use super::embedder::{Embedder, EmbeddingError};

/// Capability consumed by tag resolution.
///
/// Kept separate from `Embedder` so tests can substitute any deterministic
/// similarity function.
pub trait SemanticScorer: Send + Sync {
    /// Embed a single text.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Similarity of two embeddings; higher is closer.
    fn similarity(&self, a: &[f32], b: &[f32]) -> f32;
}

/// Cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Scorer over any `Embedder`, comparing with cosine similarity.
pub struct EmbeddingScorer {
    embedder: Box<dyn Embedder>,
}

impl EmbeddingScorer {
    pub fn new(embedder: Box<dyn Embedder>) -> Self {
        Self { embedder }
    }
}

impl SemanticScorer for EmbeddingScorer {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.embedder
            .embed_batch(&[text])?
            .into_iter()
            .next()
            .ok_or(EmbeddingError::EmptyResult)
    }

    fn similarity(&self, a: &[f32], b: &[f32]) -> f32 {
        cosine_similarity(a, b)
    }
}
