//! Memory-efficient undirected graph representation

use serde::{Deserialize, Serialize};

/// Compressed sparse representation of an undirected, optionally weighted
/// graph.
///
/// Every edge is stored in both endpoint adjacency lists, so `edges.len()` is
/// twice the number of undirected edges. Adjacency lists are sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressedGraph {
    /// Number of nodes in the graph
    pub node_count: usize,

    /// Offset array: index where each node's edges begin
    /// offsets[i] to offsets[i+1] defines the edge range for node i
    pub offsets: Vec<u32>,

    /// Edge array: concatenated lists of neighbor nodes
    pub edges: Vec<u32>,

    /// Edge weights parallel to `edges`; `None` for an unweighted graph
    pub weights: Option<Vec<f64>>,

    /// Node labels (skill names) indexed by node
    pub node_ids: Vec<String>,
}

impl Default for CompressedGraph {
    fn default() -> Self {
        Self::with_capacity(0, 0)
    }
}

impl CompressedGraph {
    /// Create a new graph with pre-allocated capacity
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);
        Self {
            node_count: 0,
            offsets,
            edges: Vec::with_capacity(edge_count),
            weights: None,
            node_ids: Vec::with_capacity(node_count),
        }
    }

    /// Neighbors of a node
    pub fn neighbors(&self, node: usize) -> &[u32] {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.edges[start..end]
    }

    /// Neighbors paired with edge weights (1.0 when unweighted)
    pub fn weighted_neighbors(&self, node: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        (start..end).map(move |pos| {
            let weight = self.weights.as_ref().map_or(1.0, |w| w[pos]);
            (self.edges[pos] as usize, weight)
        })
    }

    /// Check if there's an edge between src and dst
    pub fn has_edge(&self, src: usize, dst: u32) -> bool {
        self.neighbors(src).binary_search(&dst).is_ok()
    }

    /// Weight of the edge between src and dst, if present
    pub fn edge_weight(&self, src: usize, dst: u32) -> Option<f64> {
        let pos = self.neighbors(src).binary_search(&dst).ok()?;
        let weight = self
            .weights
            .as_ref()
            .map_or(1.0, |w| w[self.offsets[src] as usize + pos]);
        Some(weight)
    }

    /// Number of incident edges
    pub fn degree(&self, node: usize) -> usize {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        end - start
    }

    /// Sum of incident edge weights, or plain degree if unweighted
    pub fn weighted_degree(&self, node: usize) -> f64 {
        self.weighted_neighbors(node).fold(0.0, |acc, (_, w)| acc + w)
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    pub fn has_edges(&self) -> bool {
        !self.edges.is_empty()
    }

    pub fn is_weighted(&self) -> bool {
        self.weights.is_some()
    }

    /// True when every weight can serve as a path length
    pub fn has_positive_weights(&self) -> bool {
        self.weights
            .as_ref()
            .map_or(true, |w| w.iter().all(|&x| x.is_finite() && x > 0.0))
    }

    /// Same topology with weights dropped
    pub fn unweighted(&self) -> CompressedGraph {
        CompressedGraph {
            weights: None,
            ..self.clone()
        }
    }

    /// Label of a node
    pub fn node_id(&self, node: usize) -> &str {
        &self.node_ids[node]
    }

    /// Index of the node with the given label
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.node_ids.iter().position(|n| n == id)
    }

    /// Iterate over undirected edges once each as (low, high, weight)
    pub fn edge_list(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.node_count).flat_map(move |src| {
            self.weighted_neighbors(src)
                .filter(move |&(dst, _)| src < dst)
                .map(move |(dst, w)| (src, dst, w))
        })
    }
}
