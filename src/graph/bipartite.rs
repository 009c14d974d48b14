//! Job–skill bipartite relation

use std::collections::HashMap;

use itertools::Itertools;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;

use crate::data::Posting;
use crate::graph::builder::GraphBuilder;
use crate::graph::CompressedGraph;

/// Side of the bipartition a node belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Job,
    Skill,
}

/// A node label; jobs and skills live in separate namespaces
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BipartiteNode {
    pub kind: NodeKind,
    pub name: String,
}

/// Node and edge counts of a bipartite graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BipartiteSummary {
    pub job_nodes: usize,
    pub skill_nodes: usize,
    pub edges: usize,
    /// edges / (jobs * skills), 0 when either side is empty
    pub density: f64,
}

/// Undirected graph connecting postings to the skills detected in them
#[derive(Debug, Clone, Default)]
pub struct BipartiteGraph {
    graph: UnGraph<BipartiteNode, ()>,
    node_map: HashMap<BipartiteNode, NodeIndex>,
}

impl BipartiteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a node; re-adding an existing node is a no-op
    pub fn add_node(&mut self, kind: NodeKind, name: &str) -> NodeIndex {
        let key = BipartiteNode {
            kind,
            name: name.to_string(),
        };
        if let Some(&idx) = self.node_map.get(&key) {
            return idx;
        }

        let idx = self.graph.add_node(key.clone());
        self.node_map.insert(key, idx);
        idx
    }

    /// Connect a job to a skill; re-adding an existing edge is a no-op
    pub fn add_edge(&mut self, job: &str, skill: &str) {
        let job_idx = self.add_node(NodeKind::Job, job);
        let skill_idx = self.add_node(NodeKind::Skill, skill);
        self.graph.update_edge(job_idx, skill_idx, ());
    }

    fn index(&self, kind: NodeKind, name: &str) -> Option<NodeIndex> {
        let key = BipartiteNode {
            kind,
            name: name.to_string(),
        };
        self.node_map.get(&key).copied()
    }

    fn names(&self, kind: NodeKind) -> impl Iterator<Item = &str> {
        self.graph
            .node_weights()
            .filter(move |node| node.kind == kind)
            .map(|node| node.name.as_str())
    }

    /// Job identifiers in insertion order
    pub fn jobs(&self) -> impl Iterator<Item = &str> {
        self.names(NodeKind::Job)
    }

    /// Skill names in insertion order
    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.names(NodeKind::Skill)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, kind: NodeKind, name: &str) -> bool {
        self.index(kind, name).is_some()
    }

    /// Number of neighbors; 0 for unknown nodes
    pub fn degree(&self, kind: NodeKind, name: &str) -> usize {
        self.index(kind, name)
            .map_or(0, |idx| self.graph.neighbors(idx).count())
    }

    /// Names on the opposite side connected to this node, sorted
    pub fn neighbors(&self, kind: NodeKind, name: &str) -> Vec<&str> {
        self.index(kind, name)
            .map_or_else(Vec::new, |idx| self.neighbors_of(idx))
    }

    /// No edge joins two nodes of the same kind
    pub fn is_bipartite(&self) -> bool {
        self.graph.edge_indices().all(|edge| {
            self.graph
                .edge_endpoints(edge)
                .map_or(true, |(a, b)| self.graph[a].kind != self.graph[b].kind)
        })
    }

    pub fn summary(&self) -> BipartiteSummary {
        let job_nodes = self.jobs().count();
        let skill_nodes = self.skills().count();
        let edges = self.edge_count();
        let possible = job_nodes * skill_nodes;

        BipartiteSummary {
            job_nodes,
            skill_nodes,
            edges,
            density: if possible == 0 {
                0.0
            } else {
                edges as f64 / possible as f64
            },
        }
    }

    /// Weighted projection onto skill nodes: two skills are linked with a
    /// weight equal to the number of jobs they share
    pub fn project_skills(&self) -> CompressedGraph {
        let mut builder = GraphBuilder::weighted(self.node_count());

        for idx in self.graph.node_indices() {
            if self.graph[idx].kind != NodeKind::Job {
                continue;
            }
            let skills = self.neighbors_of(idx);
            for (a, b) in skills.iter().tuple_combinations() {
                builder.add_weight(a, b, 1.0);
            }
        }

        builder.build()
    }

    fn neighbors_of(&self, idx: NodeIndex) -> Vec<&str> {
        self.graph
            .neighbors(idx)
            .map(|n| self.graph[n].name.as_str())
            .sorted()
            .collect()
    }
}

/// Build the bipartite job–skill relation
pub fn build_bipartite_graph(postings: &[Posting]) -> BipartiteGraph {
    let mut graph = BipartiteGraph::new();

    for posting in postings {
        graph.add_node(NodeKind::Job, &posting.id);
        for skill in posting.skills.iter() {
            graph.add_edge(&posting.id, skill);
        }
    }

    log::info!(
        "Built bipartite graph with {} jobs, {} skills and {} edges",
        graph.jobs().count(),
        graph.skills().count(),
        graph.edge_count()
    );

    graph
}
