//! Graph representation and construction module

pub mod algorithms;
pub mod bipartite;
pub mod builder;
pub mod compressed;
pub mod stats;

pub use bipartite::{build_bipartite_graph, BipartiteGraph, NodeKind};
pub use builder::{build_cooccurrence_graph, GraphBuilder};
pub use compressed::CompressedGraph;
pub use stats::GraphStats;
