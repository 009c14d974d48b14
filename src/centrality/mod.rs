//! Centrality metrics for the skill co-occurrence graph.
//!
//! Each measure answers a different question about a skill:
//!
//! - **Degree**: how many other skills it is directly paired with.
//! - **Betweenness**: whether it sits on the paths between skill groups.
//! - **Closeness**: how few hops it is from the rest of its component.
//! - **Eigenvector**: whether it is paired with other central skills.
//! - **Weighted degree**: how many co-occurrences it takes part in.
//!
//! Sparse skill graphs routinely break algorithm preconditions (no edges,
//! several components), so [`compute_centralities`] checks what it can up
//! front and runs fallback chains for the rest: weighted attempt, then
//! unweighted attempt, then zeros. It always returns a complete and finite
//! table.

pub mod betweenness;
pub mod closeness;
pub mod eigenvector;
pub mod paths;

use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::graph::CompressedGraph;
use crate::table::Table;

pub use betweenness::betweenness_centrality;
pub use closeness::closeness_centrality;
pub use eigenvector::eigenvector_centrality;

/// Failures of the iterative measures; never leaves this module
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CentralityError {
    #[error("power iteration did not converge in {iterations} iterations")]
    NotConverged { iterations: usize },

    #[error("edge weights must be finite and non-negative")]
    InvalidWeights,

    #[error("power iteration produced non-finite values")]
    NonFinite,
}

/// Centrality scores of one node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityRecord {
    pub node: String,
    pub degree: f64,
    pub betweenness: f64,
    pub closeness: f64,
    pub eigenvector: f64,
    pub weighted_degree: f64,
}

/// Centrality records sorted by descending degree centrality
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CentralityTable {
    pub rows: Vec<CentralityRecord>,
}

impl CentralityTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CentralityRecord> {
        self.rows.iter()
    }

    pub fn get(&self, node: &str) -> Option<&CentralityRecord> {
        self.rows.iter().find(|row| row.node == node)
    }

    /// Column-named view for the presentation layer
    pub fn to_table(&self) -> Table {
        Table::from_rows(&self.rows)
    }
}

/// Degree centrality: degree / (n - 1), zero for graphs with at most one node
pub fn degree_centrality(graph: &CompressedGraph) -> Vec<f64> {
    let n = graph.node_count;
    if n <= 1 {
        return vec![0.0; n];
    }
    let scale = 1.0 / (n - 1) as f64;
    (0..n).map(|node| graph.degree(node) as f64 * scale).collect()
}

fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn betweenness_scores(graph: &CompressedGraph) -> Vec<f64> {
    if !graph.has_edges() {
        return vec![0.0; graph.node_count];
    }

    let weighted = graph.is_weighted() && graph.has_positive_weights();
    if graph.is_weighted() && !weighted {
        log::debug!("Betweenness: weights are not usable as lengths, using hop counts");
    }
    betweenness_centrality(graph, weighted)
}

fn closeness_scores(graph: &CompressedGraph) -> Vec<f64> {
    closeness_centrality(graph, true)
        .or_else(|| {
            log::debug!("Closeness: weighted distances unavailable, using hop counts");
            closeness_centrality(graph, false)
        })
        .unwrap_or_else(|| {
            log::warn!("Closeness could not be computed, reporting zeros");
            vec![0.0; graph.node_count]
        })
}

fn eigenvector_scores(graph: &CompressedGraph, config: &Config) -> Vec<f64> {
    let n = graph.node_count;
    if !graph.has_edges() {
        return vec![0.0; n];
    }

    let (max_iter, tolerance) = (config.eigenvector_max_iter, config.eigenvector_tolerance);

    eigenvector_centrality(graph, true, max_iter, tolerance)
        .or_else(|err| {
            log::warn!("Weighted eigenvector centrality failed ({}), retrying unweighted", err);
            eigenvector_centrality(graph, false, max_iter, tolerance)
        })
        .unwrap_or_else(|err| {
            log::warn!("Eigenvector centrality failed ({}), reporting zeros", err);
            vec![0.0; n]
        })
}

/// Compute every centrality measure for every node of the graph
pub fn compute_centralities(graph: &CompressedGraph, config: &Config) -> CentralityTable {
    let n = graph.node_count;
    log::info!(
        "Computing centralities for {} nodes and {} edges",
        n,
        graph.edge_count()
    );

    if n == 0 {
        return CentralityTable::default();
    }

    let degree = degree_centrality(graph);
    let betweenness = betweenness_scores(graph);
    let closeness = closeness_scores(graph);
    let eigenvector = eigenvector_scores(graph, config);

    let mut rows: Vec<CentralityRecord> = (0..n)
        .map(|node| CentralityRecord {
            node: graph.node_id(node).to_string(),
            degree: finite(degree[node]),
            betweenness: finite(betweenness[node]),
            closeness: finite(closeness[node]),
            eigenvector: finite(eigenvector[node]),
            weighted_degree: finite(graph.weighted_degree(node)),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.degree
            .total_cmp(&a.degree)
            .then_with(|| a.node.cmp(&b.node))
    });

    CentralityTable { rows }
}
