//! Summary statistics of a skill graph

use serde::Serialize;

use crate::graph::algorithms::connected_components;
use crate::graph::CompressedGraph;

/// Degree buckets 0..=100, the last one collecting 100+
const DEGREE_BUCKETS: usize = 101;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub total_weight: f64,
    pub component_count: usize,
    pub largest_component_size: usize,
    pub isolated_nodes: usize,
    pub density: f64,
    pub avg_degree: f64,
    pub degree_distribution: Vec<usize>,
}

impl GraphStats {
    pub fn compute(graph: &CompressedGraph) -> Self {
        let n = graph.node_count;
        let edge_count = graph.edge_count();
        let components = connected_components(graph);

        let mut degree_distribution = vec![0; DEGREE_BUCKETS];
        let mut isolated_nodes = 0;
        for node in 0..n {
            let degree = graph.degree(node);
            if degree == 0 {
                isolated_nodes += 1;
            }
            degree_distribution[degree.min(DEGREE_BUCKETS - 1)] += 1;
        }

        // Trim empty high buckets
        while degree_distribution.len() > 1 && degree_distribution.last() == Some(&0) {
            degree_distribution.pop();
        }

        let density = if n <= 1 {
            0.0
        } else {
            2.0 * edge_count as f64 / (n * (n - 1)) as f64
        };

        Self {
            node_count: n,
            edge_count,
            total_weight: graph.edge_list().map(|(_, _, w)| w).sum(),
            component_count: components.len(),
            largest_component_size: components.first().map_or(0, Vec::len),
            isolated_nodes,
            density,
            avg_degree: if n == 0 {
                0.0
            } else {
                2.0 * edge_count as f64 / n as f64
            },
            degree_distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Posting;
    use crate::graph::build_cooccurrence_graph;

    #[test]
    fn triangle_plus_pair_statistics() {
        let graph = build_cooccurrence_graph(&[
            Posting::new("1", ["A", "B", "C"]),
            Posting::new("2", ["A", "B"]),
            Posting::new("3", ["X", "Y"]),
        ]);
        let stats = GraphStats::compute(&graph);

        assert_eq!(stats.node_count, 5);
        assert_eq!(stats.edge_count, 4);
        assert_eq!(stats.total_weight, 5.0);
        assert_eq!(stats.component_count, 2);
        assert_eq!(stats.largest_component_size, 3);
        assert_eq!(stats.isolated_nodes, 0);
        assert!((stats.density - 0.4).abs() < 1e-12);
        assert!((stats.avg_degree - 1.6).abs() < 1e-12);
        assert_eq!(stats.degree_distribution, vec![0, 2, 3]);
    }

    #[test]
    fn empty_graph_statistics() {
        let stats = GraphStats::compute(&CompressedGraph::default());
        assert_eq!(stats.node_count, 0);
        assert_eq!(stats.component_count, 0);
        assert_eq!(stats.density, 0.0);
        assert_eq!(stats.degree_distribution, vec![0]);
    }
}
