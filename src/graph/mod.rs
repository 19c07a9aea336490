//! Bipartite book/theme graph

mod assembler;
mod edge;
mod node;
mod theme_graph;


pub use assembler::GraphAssembler;
pub use edge::Edge;
pub use node::{Node, NodeKind};
pub use theme_graph::ThemeGraph;
