//! Louvain modularity optimisation.
//!
//! Each level runs local moving (every node, in index order, joins the
//! neighboring community with the best modularity gain) until no node
//! moves, then collapses communities into single nodes whose self-loops
//! carry the internal weight. Levels repeat until local moving changes
//! nothing. Node order and tie-breaking are fixed, so the result is
//! deterministic.

use std::collections::BTreeMap;

use crate::community::CommunityError;
use crate::graph::CompressedGraph;

/// Gains below this are treated as no improvement
const MIN_GAIN: f64 = 1e-12;

/// Upper bound on local-moving sweeps per level
const MAX_SWEEPS: usize = 100;

/// Upper bound on aggregation levels
const MAX_LEVELS: usize = 32;

/// Weighted adjacency with explicit self-loops, used between levels
struct LevelGraph {
    adjacency: Vec<Vec<(usize, f64)>>,
    self_loops: Vec<f64>,
}

impl LevelGraph {
    fn from_graph(graph: &CompressedGraph) -> Self {
        let adjacency = (0..graph.node_count)
            .map(|node| graph.weighted_neighbors(node).collect())
            .collect();
        Self {
            adjacency,
            self_loops: vec![0.0; graph.node_count],
        }
    }

    fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Weighted degree; a self-loop counts twice
    fn strength(&self, node: usize) -> f64 {
        self.adjacency[node].iter().map(|&(_, w)| w).sum::<f64>() + 2.0 * self.self_loops[node]
    }

    /// Collapse each community into one node
    fn aggregate(&self, membership: &[usize], community_count: usize) -> LevelGraph {
        let mut links: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); community_count];
        let mut self_loops = vec![0.0; community_count];

        for node in 0..self.len() {
            let c = membership[node];
            self_loops[c] += self.self_loops[node];
            for &(nbr, w) in &self.adjacency[node] {
                let d = membership[nbr];
                if c == d {
                    // Seen once from each endpoint
                    self_loops[c] += w / 2.0;
                } else {
                    *links[c].entry(d).or_insert(0.0) += w;
                }
            }
        }

        LevelGraph {
            adjacency: links.into_iter().map(|m| m.into_iter().collect()).collect(),
            self_loops,
        }
    }
}

/// Renumber labels to 0..count in order of first appearance
fn compact(labels: &mut [usize]) -> usize {
    let mut remap: BTreeMap<usize, usize> = BTreeMap::new();
    for label in labels.iter_mut() {
        let next = remap.len();
        *label = *remap.entry(*label).or_insert(next);
    }
    remap.len()
}

/// One round of local moving; returns the membership and whether any node
/// changed community
fn local_moving(level: &LevelGraph, total: f64) -> (Vec<usize>, bool) {
    let n = level.len();
    let strength: Vec<f64> = (0..n).map(|node| level.strength(node)).collect();
    let mut membership: Vec<usize> = (0..n).collect();
    let mut community_strength = strength.clone();
    let mut moved_any = false;

    for _ in 0..MAX_SWEEPS {
        let mut moved = false;

        for node in 0..n {
            let home = membership[node];
            let k = strength[node];

            // Weight from node into each neighboring community
            let mut links: BTreeMap<usize, f64> = BTreeMap::new();
            for &(nbr, w) in &level.adjacency[node] {
                if nbr != node {
                    *links.entry(membership[nbr]).or_insert(0.0) += w;
                }
            }

            community_strength[home] -= k;

            let gain = |c: usize, k_in: f64| k_in - community_strength[c] * k / total;
            let mut best = home;
            let mut best_gain = gain(home, links.get(&home).copied().unwrap_or(0.0));

            for (&c, &k_in) in &links {
                let candidate = gain(c, k_in);
                if candidate > best_gain + MIN_GAIN {
                    best = c;
                    best_gain = candidate;
                }
            }

            community_strength[best] += k;
            if best != home {
                membership[node] = best;
                moved = true;
                moved_any = true;
            }
        }

        if !moved {
            break;
        }
    }

    (membership, moved_any)
}

/// Louvain partition of the graph's nodes, one label per node
pub fn louvain(graph: &CompressedGraph) -> Result<Vec<usize>, CommunityError> {
    let n = graph.node_count;
    if let Some(weights) = &graph.weights {
        if weights.iter().any(|&w| !w.is_finite() || w < 0.0) {
            return Err(CommunityError::InvalidWeights);
        }
    }

    let mut level = LevelGraph::from_graph(graph);
    // Sum of all strengths: twice the total edge weight
    let total: f64 = (0..level.len()).map(|node| level.strength(node)).sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(CommunityError::DegenerateWeights { total });
    }

    let mut assignment: Vec<usize> = (0..n).collect();

    for depth in 0..MAX_LEVELS {
        let (mut membership, moved) = local_moving(&level, total);
        if !moved {
            log::debug!("Louvain settled after {} levels", depth);
            break;
        }

        let community_count = compact(&mut membership);
        for label in assignment.iter_mut() {
            *label = membership[*label];
        }
        level = level.aggregate(&membership, community_count);
    }

    compact(&mut assignment);
    Ok(assignment)
}

/// Newman modularity of a partition (resolution 1)
pub fn modularity(graph: &CompressedGraph, labels: &[usize]) -> f64 {
    let total: f64 = (0..graph.node_count).map(|n| graph.weighted_degree(n)).sum();
    if total <= 0.0 || labels.len() != graph.node_count {
        return 0.0;
    }

    let mut internal: BTreeMap<usize, f64> = BTreeMap::new();
    let mut strength: BTreeMap<usize, f64> = BTreeMap::new();
    for node in 0..graph.node_count {
        let c = labels[node];
        *strength.entry(c).or_insert(0.0) += graph.weighted_degree(node);
        for (nbr, w) in graph.weighted_neighbors(node) {
            if labels[nbr] == c {
                *internal.entry(c).or_insert(0.0) += w;
            }
        }
    }

    strength
        .iter()
        .map(|(c, &s)| internal.get(c).copied().unwrap_or(0.0) / total - (s / total).powi(2))
        .sum()
}
