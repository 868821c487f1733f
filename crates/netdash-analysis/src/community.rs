//! Louvain community detection (weighted modularity).

use std::collections::HashMap;

use petgraph::graph::UnGraph;
use tracing::debug;

use crate::adjacency;

/// Parameters for [`louvain`].
#[derive(Debug, Clone)]
pub struct LouvainConfig {
    /// Maximum number of aggregation levels.
    pub max_levels: usize,
    /// Maximum local-moving sweeps per level.
    pub max_sweeps: usize,
    /// Minimum modularity gain for a node to change community.
    pub min_gain: f64,
}

impl Default for LouvainConfig {
    fn default() -> Self {
        Self {
            max_levels: 10,
            max_sweeps: 100,
            min_gain: 1e-9,
        }
    }
}

/// One level of the hierarchy. Self-loops are kept apart from `adj`, which
/// lists each undirected edge in both rows.
#[derive(Debug, Clone)]
struct LevelGraph {
    adj: Vec<Vec<(usize, f64)>>,
    self_loops: Vec<f64>,
}

impl LevelGraph {
    fn from_adjacency(rows: Vec<Vec<(usize, f64)>>) -> Self {
        let n = rows.len();
        let mut adj = vec![Vec::new(); n];
        let mut self_loops = vec![0.0; n];
        for (i, row) in rows.into_iter().enumerate() {
            for (j, w) in row {
                if i == j {
                    self_loops[i] += w;
                } else {
                    adj[i].push((j, w));
                }
            }
        }
        Self { adj, self_loops }
    }

    fn len(&self) -> usize {
        self.adj.len()
    }

    /// Weighted degree; a self-loop counts twice.
    fn degree(&self, node: usize) -> f64 {
        self.adj[node].iter().map(|&(_, w)| w).sum::<f64>() + 2.0 * self.self_loops[node]
    }

    /// Collapse each community into a single node.
    fn aggregate(&self, communities: &[usize], count: usize) -> Self {
        let mut self_loops = vec![0.0; count];
        let mut links: Vec<HashMap<usize, f64>> = vec![HashMap::new(); count];

        for (i, row) in self.adj.iter().enumerate() {
            let ci = communities[i];
            self_loops[ci] += self.self_loops[i];
            for &(j, w) in row {
                let cj = communities[j];
                if ci == cj {
                    // Seen once from each endpoint.
                    self_loops[ci] += w / 2.0;
                } else {
                    *links[ci].entry(cj).or_insert(0.0) += w;
                }
            }
        }

        let adj = links
            .into_iter()
            .map(|row| {
                let mut row: Vec<(usize, f64)> = row.into_iter().collect();
                row.sort_by_key(|&(j, _)| j);
                row
            })
            .collect();
        Self { adj, self_loops }
    }
}

/// Sequential local moving. Returns the compacted assignment, the number of
/// communities, and whether any node moved.
fn local_moving(level: &LevelGraph, total: f64, config: &LouvainConfig) -> (Vec<usize>, usize, bool) {
    let n = level.len();
    let degrees: Vec<f64> = (0..n).map(|i| level.degree(i)).collect();
    let mut community: Vec<usize> = (0..n).collect();
    let mut tot = degrees.clone();
    let mut moved_any = false;

    for _ in 0..config.max_sweeps {
        let mut moved = false;

        for node in 0..n {
            let own = community[node];
            let k = degrees[node];

            // Weight from `node` into each neighbouring community, in first-seen order.
            let mut order: Vec<usize> = Vec::new();
            let mut k_in: HashMap<usize, f64> = HashMap::new();
            for &(j, w) in &level.adj[node] {
                let c = community[j];
                let entry = k_in.entry(c).or_insert_with(|| {
                    order.push(c);
                    0.0
                });
                *entry += w;
            }

            tot[own] -= k;
            let gain = |c: usize, k_in: f64| k_in - tot[c] * k / total;
            let stay = gain(own, k_in.get(&own).copied().unwrap_or(0.0));

            let mut best = own;
            let mut best_gain = stay;
            for &c in &order {
                let g = gain(c, k_in[&c]);
                if g > best_gain + config.min_gain {
                    best = c;
                    best_gain = g;
                }
            }

            tot[best] += k;
            if best != own {
                community[node] = best;
                moved = true;
            }
        }

        if !moved {
            break;
        }
        moved_any = true;
    }

    let count = compact(&mut community);
    (community, count, moved_any)
}

/// Relabel to `0..count` in first-seen order; returns `count`.
fn compact(labels: &mut [usize]) -> usize {
    let mut remap: HashMap<usize, usize> = HashMap::new();
    for label in labels.iter_mut() {
        let next = remap.len();
        *label = *remap.entry(*label).or_insert(next);
    }
    remap.len()
}

/// Community label per node, index-aligned with the graph's node indices.
///
/// Labels are `0..k`, numbered in order of first appearance. A graph with no
/// edge weight puts every node in its own community.
pub fn louvain<N>(graph: &UnGraph<N, f64>, config: &LouvainConfig) -> Vec<usize> {
    let mut level = LevelGraph::from_adjacency(adjacency(graph));
    let mut membership: Vec<usize> = (0..level.len()).collect();

    let total: f64 = (0..level.len()).map(|i| level.degree(i)).sum();
    if total <= 0.0 {
        return membership;
    }

    for depth in 0..config.max_levels {
        let (communities, count, moved) = local_moving(&level, total, config);
        if !moved {
            break;
        }
        for slot in membership.iter_mut() {
            *slot = communities[*slot];
        }
        debug!(level = depth, communities = count, "Louvain level finished");
        if count == level.len() {
            break;
        }
        level = level.aggregate(&communities, count);
    }

    compact(&mut membership);
    membership
}
