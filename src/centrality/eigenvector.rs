//! Eigenvector centrality via power iteration.
//!
//! Iterates `x <- (A + I) x` from a uniform start, normalizing to unit L2
//! norm each round. The added identity keeps bipartite-like structures from
//! oscillating. Convergence is declared when the L1 change falls below
//! `n * tolerance`.

use crate::centrality::CentralityError;
use crate::graph::CompressedGraph;

/// Eigenvector centrality for every node, indexed by node.
///
/// Fails with [`CentralityError::NotConverged`] when `max_iter` rounds are
/// not enough, and with [`CentralityError::InvalidWeights`] when a weighted
/// run meets negative or non-finite weights.
pub fn eigenvector_centrality(
    graph: &CompressedGraph,
    weighted: bool,
    max_iter: usize,
    tolerance: f64,
) -> Result<Vec<f64>, CentralityError> {
    let n = graph.node_count;
    if n == 0 {
        return Ok(Vec::new());
    }

    let weighted = weighted && graph.is_weighted();
    if weighted
        && graph
            .weights
            .as_ref()
            .is_some_and(|w| w.iter().any(|&x| !x.is_finite() || x < 0.0))
    {
        return Err(CentralityError::InvalidWeights);
    }

    let mut x = vec![1.0 / n as f64; n];

    for _ in 0..max_iter {
        let last = x.clone();

        for node in 0..n {
            for (nbr, w) in graph.weighted_neighbors(node) {
                let w = if weighted { w } else { 1.0 };
                x[nbr] += last[node] * w;
            }
        }

        let norm = x.iter().map(|v| v * v).sum::<f64>().sqrt();
        if !norm.is_finite() {
            return Err(CentralityError::NonFinite);
        }
        let norm = if norm == 0.0 { 1.0 } else { norm };
        for v in &mut x {
            *v /= norm;
        }

        let change: f64 = x.iter().zip(&last).map(|(a, b)| (a - b).abs()).sum();
        if change < n as f64 * tolerance {
            // Isolated nodes only decay towards zero under A + I
            for (node, v) in x.iter_mut().enumerate() {
                if graph.degree(node) == 0 {
                    *v = 0.0;
                }
            }
            return Ok(x);
        }
    }

    Err(CentralityError::NotConverged {
        iterations: max_iter,
    })
}
