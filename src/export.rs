//! Rendering hand-off formats for a finished ThemeGraph
//!
//! The graph is never drawn here. JSON is for programmatic consumers,
//! DOT for Graphviz, text for a quick look in a terminal.

use crate::graph::ThemeGraph;
use clap::ValueEnum;

/// Output format for `ThemeGraph` export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Json,
    Dot,
    Text,
}

const BOOK_COLOR: &str = "skyblue";
const THEME_COLOR: &str = "lightgreen";

/// Render the graph in the given format.
pub fn render(graph: &ThemeGraph, format: ExportFormat) -> Result<String, serde_json::Error> {
    match format {
        ExportFormat::Json => to_json(graph),
        ExportFormat::Dot => Ok(to_dot(graph)),
        ExportFormat::Text => Ok(to_text(graph)),
    }
}

/// Pretty-printed `{ root, nodes, edges }` document.
pub fn to_json(graph: &ThemeGraph) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(graph)
}

/// Undirected Graphviz document. The root is drawn larger and bold.
pub fn to_dot(graph: &ThemeGraph) -> String {
    let mut out = String::from("graph themes {\n");
    out.push_str("    node [style=filled, fontname=\"Helvetica\"];\n");
    for node in graph.nodes() {
        let color = if node.is_book() { BOOK_COLOR } else { THEME_COLOR };
        let label = dot_escape(&node.label);
        if node.label == graph.root() {
            out.push_str(&format!(
                "    \"{}\" [fillcolor={}, shape=box, fontsize=18, penwidth=2, style=\"filled,bold\"];\n",
                label, color
            ));
        } else {
            out.push_str(&format!("    \"{}\" [fillcolor={}];\n", label, color));
        }
    }
    for edge in graph.edges() {
        out.push_str(&format!(
            "    \"{}\" -- \"{}\";\n",
            dot_escape(&edge.book),
            dot_escape(&edge.theme)
        ));
    }
    out.push_str("}\n");
    out
}

/// Root title, then each theme with the books linked to it.
pub fn to_text(graph: &ThemeGraph) -> String {
    let mut out = format!("{}\n", graph.root());
    for theme in graph.themes() {
        out.push_str(&format!("  [{}]\n", theme));
        for book in graph.books_for_theme(theme) {
            out.push_str(&format!("    - {}\n", book));
        }
    }
    out
}

fn dot_escape(label: &str) -> String {
    label
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
