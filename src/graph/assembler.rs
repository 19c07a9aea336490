//! GraphAssembler: tags and related works → ThemeGraph

use super::theme_graph::ThemeGraph;
use std::collections::HashMap;
use tracing::debug;

/// Composes the resolved tag set and per-tag related works into a
/// bipartite graph rooted at the source book.
///
/// All themes are registered before any related book, so a theme label
/// always wins over an identical related-book label. The root is
/// registered first of all, so a tag equal to the root title is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct GraphAssembler;

impl GraphAssembler {
    pub fn new() -> Self {
        Self
    }

    pub fn assemble(
        &self,
        root_title: &str,
        final_tags: &[String],
        related_by_tag: &HashMap<String, Vec<String>>,
    ) -> ThemeGraph {
        let mut graph = ThemeGraph::new(root_title);

        let mut placed: Vec<&str> = Vec::with_capacity(final_tags.len());
        for tag in final_tags {
            if graph.add_theme(tag) {
                graph.link(root_title, tag);
                placed.push(tag);
            } else {
                debug!(tag = %tag, "tag collides with the root title; skipped");
            }
        }

        for tag in placed {
            let Some(related) = related_by_tag.get(tag) else {
                continue;
            };
            for label in related {
                if !graph.add_book(label) {
                    debug!(label = %label, "related book collides with a theme; skipped");
                    continue;
                }
                graph.link(label, tag);
            }
        }

        graph
    }
}
