//! Graph construction module

use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;

use crate::data::Posting;
use crate::graph::CompressedGraph;

/// Builder for incrementally constructing an undirected CompressedGraph
pub struct GraphBuilder {
    /// Whether accumulated weights are kept in the built graph
    weighted: bool,

    /// Mapping from string IDs to node indices
    id_to_index: HashMap<String, u32>,

    /// Node string IDs
    node_ids: Vec<String>,

    /// Neighbor -> accumulated weight, for each node
    adjacency: Vec<BTreeMap<u32, f64>>,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(capacity: usize, weighted: bool) -> Self {
        Self {
            weighted,
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            adjacency: Vec::with_capacity(capacity),
        }
    }

    pub fn weighted(capacity: usize) -> Self {
        Self::with_capacity(capacity, true)
    }

    pub fn unweighted(capacity: usize) -> Self {
        Self::with_capacity(capacity, false)
    }

    /// Get or create a node ID for the given string ID
    pub fn get_or_create_node(&mut self, id: &str) -> u32 {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        let idx = self.node_ids.len() as u32;
        self.id_to_index.insert(id.to_string(), idx);
        self.node_ids.push(id.to_string());
        self.adjacency.push(BTreeMap::new());

        idx
    }

    /// Add an edge with unit weight; adding an existing edge is a no-op
    pub fn add_edge(&mut self, src_id: &str, dst_id: &str) {
        let (src, dst) = (self.get_or_create_node(src_id), self.get_or_create_node(dst_id));
        if src == dst {
            return;
        }

        self.adjacency[src as usize].entry(dst).or_insert(1.0);
        self.adjacency[dst as usize].entry(src).or_insert(1.0);
    }

    /// Add `weight` to the edge between two nodes, creating it if needed.
    /// Self-loops are ignored.
    pub fn add_weight(&mut self, src_id: &str, dst_id: &str, weight: f64) {
        let (src, dst) = (self.get_or_create_node(src_id), self.get_or_create_node(dst_id));
        if src == dst {
            return;
        }

        *self.adjacency[src as usize].entry(dst).or_insert(0.0) += weight;
        *self.adjacency[dst as usize].entry(src).or_insert(0.0) += weight;
    }

    /// Build the compressed graph.
    ///
    /// Nodes are renumbered in lexicographic label order, so the result does
    /// not depend on insertion order.
    pub fn build(self) -> CompressedGraph {
        let node_count = self.node_ids.len();

        let mut order: Vec<usize> = (0..node_count).collect();
        order.sort_by(|&a, &b| self.node_ids[a].cmp(&self.node_ids[b]));

        let mut old_to_new = vec![0u32; node_count];
        for (new_idx, &old_idx) in order.iter().enumerate() {
            old_to_new[old_idx] = new_idx as u32;
        }

        let edge_count: usize = self.adjacency.iter().map(BTreeMap::len).sum();
        let mut graph = CompressedGraph::with_capacity(node_count, edge_count);
        let mut weights = Vec::with_capacity(edge_count);

        let mut offset = 0u32;
        for &old_idx in &order {
            let mut neighbors: Vec<(u32, f64)> = self.adjacency[old_idx]
                .iter()
                .map(|(&dst, &w)| (old_to_new[dst as usize], w))
                .collect();
            neighbors.sort_unstable_by_key(|&(dst, _)| dst);

            for (dst, w) in neighbors {
                graph.edges.push(dst);
                weights.push(w);
                offset += 1;
            }
            graph.offsets.push(offset);
            graph.node_ids.push(self.node_ids[old_idx].clone());
        }

        graph.node_count = node_count;
        graph.weights = self.weighted.then_some(weights);
        graph
    }
}

/// Build the weighted skill co-occurrence graph.
///
/// Every unordered pair of distinct skills in a posting adds 1 to the pair's
/// edge weight. Only skills that co-occur with at least one other skill
/// become nodes.
pub fn build_cooccurrence_graph(postings: &[Posting]) -> CompressedGraph {
    log::info!("Building skill co-occurrence graph from {} postings", postings.len());

    let mut builder = GraphBuilder::weighted(postings.len());
    for posting in postings {
        for (a, b) in posting.skills.iter().tuple_combinations() {
            builder.add_weight(a, b, 1.0);
        }
    }

    let graph = builder.build();
    log::info!(
        "Co-occurrence graph has {} skills and {} edges",
        graph.node_count,
        graph.edge_count()
    );

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight(graph: &CompressedGraph, a: &str, b: &str) -> Option<f64> {
        let src = graph.node_index(a)?;
        let dst = graph.node_index(b)? as u32;
        graph.edge_weight(src, dst)
    }

    fn triangle_postings() -> Vec<Posting> {
        vec![
            Posting::new("1", ["Python", "SQL"]),
            Posting::new("2", ["Python", "Excel"]),
            Posting::new("3", ["SQL", "Excel"]),
        ]
    }

    #[test]
    fn triangle_has_unit_weights() {
        let graph = build_cooccurrence_graph(&triangle_postings());

        assert_eq!(graph.node_count, 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(weight(&graph, "Python", "SQL"), Some(1.0));
        assert_eq!(weight(&graph, "Python", "Excel"), Some(1.0));
        assert_eq!(weight(&graph, "SQL", "Excel"), Some(1.0));
    }

    #[test]
    fn repeated_pairs_accumulate() {
        let postings = vec![
            Posting::new("1", ["A", "B"]),
            Posting::new("2", ["A", "B"]),
            Posting::new("3", ["B", "A", "A"]),
            Posting::new("4", ["C"]),
            Posting::new("5", Vec::<&str>::new()),
        ];
        let graph = build_cooccurrence_graph(&postings);

        assert_eq!(weight(&graph, "A", "B"), Some(3.0));
        assert_eq!(weight(&graph, "B", "A"), Some(3.0));
        assert_eq!(weight(&graph, "A", "A"), None);
        // C never pairs with anything
        assert_eq!(graph.node_index("C"), None);
        assert_eq!(graph.node_count, 2);
    }

    #[test]
    fn result_is_invariant_to_posting_order() {
        let mut postings = triangle_postings();
        postings.push(Posting::new("4", ["Git", "Python", "AWS"]));
        let forward = build_cooccurrence_graph(&postings);

        postings.reverse();
        let backward = build_cooccurrence_graph(&postings);

        assert_eq!(forward, backward);
    }

    #[test]
    fn nodes_are_ordered_by_label() {
        let graph = build_cooccurrence_graph(&triangle_postings());
        assert_eq!(graph.node_ids, vec!["Excel", "Python", "SQL"]);
    }

    #[test]
    fn unweighted_builder_deduplicates_edges() {
        let mut builder = GraphBuilder::unweighted(2);
        builder.add_edge("x", "y");
        builder.add_edge("y", "x");
        builder.add_edge("x", "x");
        let graph = builder.build();

        assert!(!graph.is_weighted());
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.degree(0), 1);
    }
}
