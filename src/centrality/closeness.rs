//! Closeness centrality with the Wasserman–Faust correction.
//!
//! For a node reaching `r` nodes (itself included) with total distance `d`:
//! `closeness = ((r - 1) / d) * ((r - 1) / (n - 1))`. Components are scored
//! independently and the second factor scales small components down.

use crate::centrality::paths::single_source;
use crate::graph::CompressedGraph;

/// Closeness for every node, or `None` when it cannot be computed with the
/// requested distances (non-positive or non-finite weights).
pub fn closeness_centrality(graph: &CompressedGraph, weighted: bool) -> Option<Vec<f64>> {
    let n = graph.node_count;
    let weighted = weighted && graph.is_weighted();

    if weighted && !graph.has_positive_weights() {
        return None;
    }

    let mut scores = Vec::with_capacity(n);
    for node in 0..n {
        let paths = single_source(graph, node, weighted);
        let total = paths.total_distance();
        let reached = (paths.reached() - 1) as f64;

        let score = if total > 0.0 && n > 1 {
            (reached / total) * (reached / (n - 1) as f64)
        } else {
            0.0
        };

        if !score.is_finite() {
            return None;
        }
        scores.push(score);
    }

    Some(scores)
}
