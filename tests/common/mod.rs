//! Shared helpers for pipeline integration tests
//!
//! A keyword-axis scorer stands in for the embedding model where a test
//! needs exact control over scores; `lexical_pipeline` wires the scorer and
//! tables the CLI uses by default. Pipelines use `NoPause` so nothing
//! sleeps.

#![allow(dead_code)]

use bookgraph::semantic::{
    cosine_similarity, EmbeddingError, EmbeddingScorer, LexicalEmbedder, SemanticScorer, ThemeVocabulary,
};
use bookgraph::{
    BookGraphPipeline, CatalogClient, CatalogRecord, Config, NoPause, Pacer, RelatedWorkFinder, TagPolicy,
    TagResolver,
};
use std::sync::Arc;

/// One dimension per keyword; a text lights up every keyword it contains.
pub struct KeywordScorer {
    axes: Vec<&'static str>,
}

impl KeywordScorer {
    pub fn new() -> Self {
        Self {
            axes: vec!["love", "psychological", "war", "grief", "memory", "sea", "coming of age"],
        }
    }
}

impl SemanticScorer for KeywordScorer {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let t = text.to_lowercase();
        Ok(self
            .axes
            .iter()
            .map(|axis| if t.contains(axis) { 1.0 } else { 0.0 })
            .collect())
    }

    fn similarity(&self, a: &[f32], b: &[f32]) -> f32 {
        cosine_similarity(a, b)
    }
}

pub const VOCABULARY: &[&str] = &[
    "love stories",
    "psychological fiction",
    "war",
    "grief",
    "memory",
    "coming of age",
];

pub const REGIONS: &[&str] = &["Japan", "France", "England", "India"];

pub const BLOCKLIST: &[&str] = &["Fiction", "Accessible book", "Protected DAISY", "In library"];

/// Pipeline over `catalog` with the keyword scorer and no pacing.
pub fn pipeline(catalog: Arc<dyn CatalogClient>) -> BookGraphPipeline {
    pipeline_with_pacer(catalog, Arc::new(NoPause))
}

pub fn pipeline_with_pacer(catalog: Arc<dyn CatalogClient>, pacer: Arc<dyn Pacer>) -> BookGraphPipeline {
    let scorer: Arc<dyn SemanticScorer> = Arc::new(KeywordScorer::new());
    let vocabulary = ThemeVocabulary::embed(VOCABULARY, scorer.as_ref()).expect("vocabulary embeds");
    let resolver = TagResolver::new(scorer, vocabulary, TagPolicy::new(REGIONS, BLOCKLIST));
    let finder = RelatedWorkFinder::new(catalog.clone(), pacer.clone());
    BookGraphPipeline::new(catalog, resolver, finder, pacer)
}

/// The default build: lexical embedder over `config`'s theme vocabulary.
pub fn lexical_scorer(config: &Config) -> Arc<dyn SemanticScorer> {
    let embedder = LexicalEmbedder::from_vocabulary(&config.tags.theme_vocabulary);
    Arc::new(EmbeddingScorer::new(Box::new(embedder)))
}

/// Pipeline over `catalog` with default configuration and the lexical scorer.
pub fn lexical_pipeline(catalog: Arc<dyn CatalogClient>) -> BookGraphPipeline {
    let config = Config::default();
    BookGraphPipeline::from_config(&config, catalog, lexical_scorer(&config), Arc::new(NoPause))
        .expect("default vocabulary embeds")
}

pub fn record(title: &str, subjects: &[&str]) -> CatalogRecord {
    CatalogRecord::new(title).with_subjects(subjects.iter().copied())
}

pub fn related(title: &str, author: &str, editions: u32, subjects: &[&str]) -> CatalogRecord {
    CatalogRecord::new(title)
        .with_author(author)
        .with_edition_count(editions)
        .with_subjects(subjects.iter().copied())
}
