//! Betweenness centrality via Brandes' algorithm.
//!
//! For each source node, shortest paths are computed (BFS when unweighted,
//! Dijkstra with edge weights as lengths otherwise) and pair dependencies
//! are accumulated in reverse distance order.
//!
//! Complexity: O(V * E) unweighted, O(V * E + V^2 log V) weighted. This is
//! the most expensive measure in the engine; skill graphs with a few
//! thousand nodes are fine, much larger graphs are not.
//!
//! Scores are normalized by `(n - 1) * (n - 2)`. Each unordered pair is
//! visited from both endpoints, so this maps the undirected maximum (a star
//! centre) to 1.0.

use crate::centrality::paths::single_source;
use crate::graph::CompressedGraph;

/// Normalized betweenness for every node, indexed by node.
///
/// An edgeless graph returns zeros without running the algorithm.
pub fn betweenness_centrality(graph: &CompressedGraph, weighted: bool) -> Vec<f64> {
    let n = graph.node_count;
    let mut cb = vec![0.0; n];

    if !graph.has_edges() {
        return cb;
    }

    for s in 0..n {
        let mut paths = single_source(graph, s, weighted);
        let mut delta = vec![0.0; n];

        while let Some(w) = paths.order.pop() {
            for &v in &paths.predecessors[w] {
                if paths.sigma[w] > 0.0 {
                    delta[v] += (paths.sigma[v] / paths.sigma[w]) * (1.0 + delta[w]);
                }
            }
            if w != s {
                cb[w] += delta[w];
            }
        }
    }

    if n > 2 {
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        for score in &mut cb {
            *score *= scale;
        }
    }

    cb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn unweighted(edges: &[(&str, &str)]) -> CompressedGraph {
        let mut builder = GraphBuilder::unweighted(edges.len());
        for (a, b) in edges {
            builder.add_edge(a, b);
        }
        builder.build()
    }

    fn score(graph: &CompressedGraph, scores: &[f64], id: &str) -> f64 {
        scores[graph.node_index(id).unwrap()]
    }

    #[test]
    fn path_middle_node_is_the_bridge() {
        // a - b - c: b lies on the only a..c path
        let graph = unweighted(&[("a", "b"), ("b", "c")]);
        let bc = betweenness_centrality(&graph, false);

        assert!((score(&graph, &bc, "b") - 1.0).abs() < 1e-10);
        assert!(score(&graph, &bc, "a").abs() < 1e-10);
        assert!(score(&graph, &bc, "c").abs() < 1e-10);
    }

    #[test]
    fn star_centre_scores_one() {
        let graph = unweighted(&[("hub", "a"), ("hub", "b"), ("hub", "c"), ("hub", "d")]);
        let bc = betweenness_centrality(&graph, false);

        assert!((score(&graph, &bc, "hub") - 1.0).abs() < 1e-10);
        for leaf in ["a", "b", "c", "d"] {
            assert!(score(&graph, &bc, leaf).abs() < 1e-10);
        }
    }

    #[test]
    fn chain_of_four() {
        // a - b - c - d: b is on a..c, a..d; c is on a..d, b..d
        let graph = unweighted(&[("a", "b"), ("b", "c"), ("c", "d")]);
        let bc = betweenness_centrality(&graph, false);

        // raw undirected score 2, normalized by 3 * 2 / 2
        assert!((score(&graph, &bc, "b") - 2.0 / 3.0).abs() < 1e-10);
        assert!((score(&graph, &bc, "c") - 2.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn two_nodes_have_zero_betweenness() {
        let graph = unweighted(&[("a", "b")]);
        assert_eq!(betweenness_centrality(&graph, false), vec![0.0, 0.0]);
    }

    #[test]
    fn edgeless_graph_is_zero() {
        assert!(betweenness_centrality(&CompressedGraph::default(), true).is_empty());

        let mut builder = GraphBuilder::weighted(2);
        builder.get_or_create_node("x");
        builder.get_or_create_node("y");
        assert_eq!(betweenness_centrality(&builder.build(), true), vec![0.0, 0.0]);
    }

    #[test]
    fn weights_reroute_shortest_paths() {
        // Direct a-c edge is long, so the path through b wins when weighted
        let mut builder = GraphBuilder::weighted(3);
        builder.add_weight("a", "b", 1.0);
        builder.add_weight("b", "c", 1.0);
        builder.add_weight("a", "c", 5.0);
        let graph = builder.build();

        let weighted = betweenness_centrality(&graph, true);
        let plain = betweenness_centrality(&graph, false);

        assert!((score(&graph, &weighted, "b") - 1.0).abs() < 1e-10);
        assert!(score(&graph, &plain, "b").abs() < 1e-10);
    }
}
