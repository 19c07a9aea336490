//! Theme vocabulary embedded once at startup

use super::embedder::EmbeddingError;
use super::scorer::SemanticScorer;
use tracing::warn;

#[derive(Debug, Clone)]
struct ThemeEntry {
    phrase: String,
    vector: Vec<f32>,
}

/// Best vocabulary match for a piece of text
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeMatch<'a> {
    pub phrase: &'a str,
    pub score: f32,
}

/// The curated theme phrases, each pre-embedded with the scorer that
/// will later score subjects against them.
#[derive(Debug, Clone, Default)]
pub struct ThemeVocabulary {
    entries: Vec<ThemeEntry>,
}

impl ThemeVocabulary {
    /// Embed every phrase.
    ///
    /// Phrases that fail to embed are skipped with a warning.
    ///
    /// # Errors
    /// Returns the last embedding error when phrases were given but none
    /// could be embedded.
    pub fn embed<S: AsRef<str>>(phrases: &[S], scorer: &dyn SemanticScorer) -> Result<Self, EmbeddingError> {
        let mut entries = Vec::with_capacity(phrases.len());
        let mut last_error = None;
        for phrase in phrases {
            let phrase = phrase.as_ref();
            match scorer.embed(phrase) {
                Ok(vector) => entries.push(ThemeEntry {
                    phrase: phrase.to_string(),
                    vector,
                }),
                Err(e) => {
                    warn!(phrase, error = %e, "theme phrase could not be embedded; skipped");
                    last_error = Some(e);
                }
            }
        }
        match last_error {
            Some(e) if entries.is_empty() => Err(e),
            _ => Ok(Self { entries }),
        }
    }

    /// Highest-scoring vocabulary entry for an embedding.
    pub fn best_match(&self, vector: &[f32], scorer: &dyn SemanticScorer) -> Option<ThemeMatch<'_>> {
        self.entries
            .iter()
            .map(|entry| ThemeMatch {
                phrase: &entry.phrase,
                score: scorer.similarity(vector, &entry.vector),
            })
            .fold(None, |best: Option<ThemeMatch<'_>>, m| match best {
                Some(b) if b.score >= m.score => Some(b),
                _ => Some(m),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.phrase.as_str())
    }
}
