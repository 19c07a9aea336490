//! BookGraphPipeline: identifier → ThemeGraph
//!
//! Strictly sequential. After every catalog round-trip the injected pacer
//! is awaited: after the canonical fetch, between the two searches of a
//! tag (inside the finder), and after each tag's related works.

use crate::catalog::{CatalogClient, CatalogError};
use crate::config::Config;
use crate::graph::{GraphAssembler, ThemeGraph};
use crate::pacing::Pacer;
use crate::related::RelatedWorkFinder;
use crate::semantic::{EmbeddingError, SemanticScorer, ThemeVocabulary};
use crate::tags::{TagPolicy, TagResolver};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Reasons no graph could be produced.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no book found for identifier '{0}'")]
    NotFound(String),

    #[error("could not fetch the record for '{identifier}': {source}")]
    CanonicalFetch {
        identifier: String,
        #[source]
        source: CatalogError,
    },
}

/// Result type for pipeline runs
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Whether a book's own subjects mark it as fiction.
pub fn is_fiction<S: AsRef<str>>(subjects: &[S]) -> bool {
    subjects.iter().any(|s| {
        let s = s.as_ref().to_lowercase();
        s.contains("fiction") || s.contains("novel")
    })
}

/// Runs the whole resolution for one identifier.
pub struct BookGraphPipeline {
    catalog: Arc<dyn CatalogClient>,
    resolver: TagResolver,
    finder: RelatedWorkFinder,
    assembler: GraphAssembler,
    pacer: Arc<dyn Pacer>,
    max_results: usize,
}

impl BookGraphPipeline {
    pub const DEFAULT_MAX_RESULTS: usize = 3;

    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        resolver: TagResolver,
        finder: RelatedWorkFinder,
        pacer: Arc<dyn Pacer>,
    ) -> Self {
        Self {
            catalog,
            resolver,
            finder,
            assembler: GraphAssembler::new(),
            pacer,
            max_results: Self::DEFAULT_MAX_RESULTS,
        }
    }

    /// Related books kept per tag.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Wire every component from configuration, embedding the theme
    /// vocabulary once with `scorer`.
    ///
    /// # Errors
    /// Fails only when no vocabulary phrase could be embedded.
    pub fn from_config(
        config: &Config,
        catalog: Arc<dyn CatalogClient>,
        scorer: Arc<dyn SemanticScorer>,
        pacer: Arc<dyn Pacer>,
    ) -> Result<Self, EmbeddingError> {
        let vocabulary = ThemeVocabulary::embed(&config.tags.theme_vocabulary, scorer.as_ref())?;
        info!(entries = vocabulary.len(), "theme vocabulary embedded");
        let resolver = TagResolver::new(scorer, vocabulary, TagPolicy::from_settings(&config.tags));
        let finder = RelatedWorkFinder::new(catalog.clone(), pacer.clone())
            .with_overfetch(config.related.overfetch);
        Ok(Self::new(catalog, resolver, finder, pacer).with_max_results(config.related.max_results))
    }

    /// Build the theme graph for an identifier.
    ///
    /// # Errors
    /// `NotFound` when the identifier does not resolve, `CanonicalFetch`
    /// when the catalog could not be reached for it. Every later failure
    /// degrades the graph instead.
    pub async fn build(&self, identifier: &str) -> PipelineResult<ThemeGraph> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(PipelineError::NotFound(String::new()));
        }

        let record = self
            .catalog
            .fetch_canonical(identifier)
            .await
            .map_err(|source| PipelineError::CanonicalFetch {
                identifier: identifier.to_string(),
                source,
            })?
            .ok_or_else(|| PipelineError::NotFound(identifier.to_string()))?;
        self.pacer.pause().await;

        info!(title = %record.title, subjects = record.subjects.len(), "resolved canonical record");

        let tags = self.resolver.resolve(&record.subjects);
        let fiction = is_fiction(&record.subjects);
        let exclude = record.title.trim().to_lowercase();

        let mut related_by_tag = HashMap::with_capacity(tags.len());
        for tag in tags.iter() {
            let related = self.finder.find(tag, &exclude, fiction, self.max_results).await;
            if related.is_empty() {
                warn!(tag, "no related works found");
            }
            related_by_tag.insert(tag.to_string(), related);
            self.pacer.pause().await;
        }

        let graph = self
            .assembler
            .assemble(&record.title, tags.as_slice(), &related_by_tag);
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "theme graph assembled"
        );
        Ok(graph)
    }
}
