//! Graph algorithms for analysis

use std::collections::HashMap;

use crate::graph::CompressedGraph;

/// Union-find over node indices, union by size with path halving
struct SkillComponents {
    parent: Vec<u32>,
    size: Vec<u32>,
}

impl SkillComponents {
    fn new(node_count: usize) -> Self {
        Self {
            parent: (0..node_count as u32).collect(),
            size: vec![1; node_count],
        }
    }

    fn root(&mut self, mut node: u32) -> u32 {
        while self.parent[node as usize] != node {
            let grandparent = self.parent[self.parent[node as usize] as usize];
            self.parent[node as usize] = grandparent;
            node = grandparent;
        }
        node
    }

    fn merge(&mut self, a: u32, b: u32) {
        let (mut big, mut small) = (self.root(a), self.root(b));
        if big == small {
            return;
        }
        if self.size[big as usize] < self.size[small as usize] {
            std::mem::swap(&mut big, &mut small);
        }
        self.parent[small as usize] = big;
        self.size[big as usize] += self.size[small as usize];
    }
}

/// Connected components as lists of node indices.
///
/// Components are sorted largest first, ties by smallest member; members are
/// sorted ascending.
pub fn connected_components(graph: &CompressedGraph) -> Vec<Vec<u32>> {
    let node_count = graph.node_count;
    let mut sets = SkillComponents::new(node_count);

    for (src, dst, _) in graph.edge_list() {
        sets.merge(src as u32, dst as u32);
    }

    let mut by_root: HashMap<u32, Vec<u32>> = HashMap::new();
    for node in 0..node_count as u32 {
        let root = sets.root(node);
        by_root.entry(root).or_default().push(node);
    }

    let mut components: Vec<Vec<u32>> = by_root.into_values().collect();
    components.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a[0].cmp(&b[0])));

    log::debug!(
        "Found {} connected components over {} nodes",
        components.len(),
        node_count
    );

    components
}

/// Density of the subgraph induced by `members` (actual / potential edges).
///
/// By convention, singleton and empty groups have density 1.
pub fn induced_density(graph: &CompressedGraph, members: &[u32]) -> f64 {
    let n = members.len();
    if n <= 1 {
        return 1.0;
    }

    // Both directions are stored, so potential = n * (n - 1)
    let potential_edges = n * (n - 1);

    let member_set: std::collections::HashSet<u32> = members.iter().copied().collect();
    let actual_edges: usize = members
        .iter()
        .map(|&src| {
            graph
                .neighbors(src as usize)
                .iter()
                .filter(|dst| member_set.contains(dst))
                .count()
        })
        .sum();

    actual_edges as f64 / potential_edges as f64
}

/// Degree of each member counting only neighbors inside the group
pub fn induced_degrees(graph: &CompressedGraph, members: &[u32]) -> Vec<(u32, usize)> {
    let member_set: std::collections::HashSet<u32> = members.iter().copied().collect();
    members
        .iter()
        .map(|&node| {
            let degree = graph
                .neighbors(node as usize)
                .iter()
                .filter(|dst| member_set.contains(dst))
                .count();
            (node, degree)
        })
        .collect()
}
