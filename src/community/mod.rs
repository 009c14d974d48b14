//! Community detection over skill graphs

pub mod louvain;

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::graph::algorithms::{induced_degrees, induced_density};
use crate::graph::CompressedGraph;

pub use louvain::{louvain, modularity};

/// Numerical failures of the modularity optimisation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommunityError {
    #[error("total edge weight {total} cannot be optimised")]
    DegenerateWeights { total: f64 },

    #[error("edge weights must be finite and non-negative")]
    InvalidWeights,
}

/// Community id of every node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CommunityAssignment(BTreeMap<String, u32>);

impl CommunityAssignment {
    fn from_labels(graph: &CompressedGraph, labels: &[usize]) -> Self {
        Self(
            labels
                .iter()
                .enumerate()
                .map(|(node, &label)| (graph.node_id(node).to_string(), label as u32))
                .collect(),
        )
    }

    pub fn get(&self, node: &str) -> Option<u32> {
        self.0.get(node).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(node, &id)| (node.as_str(), id))
    }

    /// Number of distinct community ids
    pub fn community_count(&self) -> usize {
        self.groups().len()
    }

    /// Members of each community, keyed by id
    pub fn groups(&self) -> BTreeMap<u32, Vec<&str>> {
        let mut groups: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
        for (node, id) in self.iter() {
            groups.entry(id).or_default().push(node);
        }
        groups
    }
}

/// Partition the graph's nodes into communities.
///
/// An empty graph yields an empty assignment and an edgeless graph puts
/// every node in community 0. If modularity optimisation fails, every node
/// gets its own community.
pub fn detect_communities(graph: &CompressedGraph) -> CommunityAssignment {
    let n = graph.node_count;
    if n == 0 || !graph.has_edges() {
        return CommunityAssignment::from_labels(graph, &vec![0; n]);
    }

    let labels = louvain(graph).unwrap_or_else(|err| {
        log::warn!("Community detection failed ({}), using singleton communities", err);
        (0..n).collect()
    });

    let assignment = CommunityAssignment::from_labels(graph, &labels);
    log::info!(
        "Detected {} communities over {} skills (modularity {:.3})",
        assignment.community_count(),
        n,
        modularity(graph, &labels)
    );

    assignment
}

/// Size, density and most connected members of one community
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunitySummary {
    pub id: u32,
    pub size: usize,
    pub density: f64,
    pub central_members: Vec<String>,
    pub members: Vec<String>,
}

/// Summarize each community, largest first
pub fn summarize_communities(
    graph: &CompressedGraph,
    assignment: &CommunityAssignment,
    top_n: usize,
) -> Vec<CommunitySummary> {
    let mut summaries: Vec<CommunitySummary> = assignment
        .groups()
        .into_iter()
        .map(|(id, names)| {
            let members: Vec<u32> = names
                .iter()
                .filter_map(|name| graph.node_index(name).map(|idx| idx as u32))
                .collect();

            let mut by_degree = induced_degrees(graph, &members);
            by_degree.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

            CommunitySummary {
                id,
                size: names.len(),
                density: induced_density(graph, &members),
                central_members: by_degree
                    .iter()
                    .take(top_n)
                    .map(|&(node, _)| graph.node_id(node as usize).to_string())
                    .collect(),
                members: names.iter().map(|name| name.to_string()).collect(),
            }
        })
        .collect();

    summaries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.id.cmp(&b.id)));
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Posting;
    use crate::graph::{build_cooccurrence_graph, GraphBuilder};

    fn two_clusters() -> CompressedGraph {
        build_cooccurrence_graph(&[
            Posting::new("1", ["Python", "Pandas", "Numpy"]),
            Posting::new("2", ["Python", "Pandas", "Numpy"]),
            Posting::new("3", ["Excel", "Tableau", "Power BI"]),
            Posting::new("4", ["Excel", "Tableau", "Power BI"]),
            Posting::new("5", ["Numpy", "Excel"]),
        ])
    }

    #[test]
    fn edgeless_graph_shares_community_zero() {
        let mut builder = GraphBuilder::unweighted(2);
        builder.get_or_create_node("a");
        builder.get_or_create_node("b");
        let assignment = detect_communities(&builder.build());

        assert_eq!(assignment.len(), 2);
        assert_eq!(assignment.get("a"), Some(0));
        assert_eq!(assignment.get("b"), Some(0));
    }

    #[test]
    fn empty_graph_has_no_assignment() {
        assert!(detect_communities(&CompressedGraph::default()).is_empty());
    }

    #[test]
    fn separates_dense_groups() {
        let graph = two_clusters();
        let assignment = detect_communities(&graph);

        assert_eq!(assignment.len(), graph.node_count);
        assert_eq!(assignment.community_count(), 2);
        assert_eq!(assignment.get("Python"), assignment.get("Pandas"));
        assert_eq!(assignment.get("Excel"), assignment.get("Tableau"));
        assert_ne!(assignment.get("Python"), assignment.get("Excel"));
    }

    #[test]
    fn failure_falls_back_to_singletons() {
        let mut builder = GraphBuilder::weighted(3);
        builder.add_weight("a", "b", f64::NAN);
        builder.add_weight("b", "c", 1.0);
        let assignment = detect_communities(&builder.build());

        assert_eq!(assignment.community_count(), 3);
    }

    #[test]
    fn summaries_report_density_and_central_members() {
        let graph = two_clusters();
        let assignment = detect_communities(&graph);
        let summaries = summarize_communities(&graph, &assignment, 2);

        assert_eq!(summaries.len(), 2);
        assert!(summaries.iter().all(|s| s.size == 3));
        assert!(summaries.iter().all(|s| (s.density - 1.0).abs() < 1e-12));
        assert!(summaries.iter().all(|s| s.central_members.len() == 2));
        let covered: usize = summaries.iter().map(|s| s.members.len()).sum();
        assert_eq!(covered, graph.node_count);
    }
}
