//! Single-source shortest paths shared by betweenness and closeness

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::graph::CompressedGraph;

/// Relative tolerance for treating two path lengths as equal
const LENGTH_EPSILON: f64 = 1e-12;

fn same_length(a: f64, b: f64) -> bool {
    (a - b).abs() <= LENGTH_EPSILON * a.abs().max(b.abs()).max(1.0)
}

/// Shortest-path DAG rooted at one source
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    /// Reached nodes in non-decreasing distance order (source first)
    pub order: Vec<usize>,

    /// sigma[v]: number of shortest paths from the source to v
    pub sigma: Vec<f64>,

    /// predecessors[v]: nodes immediately before v on shortest paths
    pub predecessors: Vec<Vec<usize>>,

    /// dist[v]: path length from the source, `None` if unreachable
    pub dist: Vec<Option<f64>>,
}

impl ShortestPaths {
    fn new(n: usize, source: usize) -> Self {
        let mut sigma = vec![0.0; n];
        sigma[source] = 1.0;
        let mut dist = vec![None; n];
        dist[source] = Some(0.0);

        Self {
            order: Vec::with_capacity(n),
            sigma,
            predecessors: vec![Vec::new(); n],
            dist,
        }
    }

    /// Sum of distances to every reached node
    pub fn total_distance(&self) -> f64 {
        self.dist.iter().flatten().sum()
    }

    /// Number of reached nodes, the source included
    pub fn reached(&self) -> usize {
        self.order.len()
    }
}

/// Heap entry ordered so that the smallest distance pops first
#[derive(Debug, Clone, Copy)]
struct MinDist(f64, usize);

impl PartialEq for MinDist {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MinDist {}

impl PartialOrd for MinDist {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MinDist {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .total_cmp(&self.0)
            .then_with(|| other.1.cmp(&self.1))
    }
}

/// Breadth-first shortest paths, every edge has length 1
pub fn bfs(graph: &CompressedGraph, source: usize) -> ShortestPaths {
    let mut paths = ShortestPaths::new(graph.node_count, source);
    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        paths.order.push(v);
        let dv = paths.dist[v].unwrap_or(0.0);

        for &w in graph.neighbors(v) {
            let w = w as usize;
            if paths.dist[w].is_none() {
                paths.dist[w] = Some(dv + 1.0);
                queue.push_back(w);
            }
            if paths.dist[w] == Some(dv + 1.0) {
                paths.sigma[w] += paths.sigma[v];
                paths.predecessors[w].push(v);
            }
        }
    }

    paths
}

/// Dijkstra shortest paths using edge weights as lengths.
///
/// Weights must be finite and positive; callers check
/// [`CompressedGraph::has_positive_weights`] first.
pub fn dijkstra(graph: &CompressedGraph, source: usize) -> ShortestPaths {
    let n = graph.node_count;
    let mut paths = ShortestPaths::new(n, source);
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();
    heap.push(MinDist(0.0, source));

    while let Some(MinDist(dv, v)) = heap.pop() {
        if settled[v] {
            continue;
        }
        settled[v] = true;
        paths.order.push(v);

        for (w, length) in graph.weighted_neighbors(v) {
            if settled[w] {
                continue;
            }
            let candidate = dv + length;

            match paths.dist[w] {
                Some(current) if same_length(candidate, current) => {
                    paths.sigma[w] += paths.sigma[v];
                    paths.predecessors[w].push(v);
                }
                Some(current) if candidate > current => {}
                _ => {
                    paths.dist[w] = Some(candidate);
                    paths.sigma[w] = paths.sigma[v];
                    paths.predecessors[w] = vec![v];
                    heap.push(MinDist(candidate, w));
                }
            }
        }
    }

    paths
}

/// Shortest paths from `source`, weighted when requested
pub fn single_source(graph: &CompressedGraph, source: usize, weighted: bool) -> ShortestPaths {
    if weighted && graph.is_weighted() {
        dijkstra(graph, source)
    } else {
        bfs(graph, source)
    }
}
