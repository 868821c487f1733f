//! Random graph generators.
//!
//! Generated graphs have node ids `0..n`, names equal to the id, unit edge
//! weights and no layout.

use netdash_core::{GraphEdge, GraphNode, NetworkGraph};
use rand::Rng;

fn bare_nodes(n: usize) -> Vec<GraphNode> {
    (0..n as u64).map(|i| GraphNode::new(i, i.to_string())).collect()
}

/// G(n, p): every unordered pair is joined independently with probability `p`.
pub fn erdos_renyi<R: Rng + ?Sized>(n: usize, p: f64, rng: &mut R) -> NetworkGraph {
    let p = p.clamp(0.0, 1.0);
    let mut edges = Vec::new();
    for a in 0..n as u64 {
        for b in (a + 1)..n as u64 {
            if rng.gen_bool(p) {
                edges.push(GraphEdge::new(a, b, 1.0));
            }
        }
    }
    NetworkGraph::new(bare_nodes(n), edges)
}

/// Preferential attachment: each new node links to `m` distinct earlier nodes
/// (fewer while fewer exist), picked with probability proportional to degree + 1.
pub fn barabasi_albert<R: Rng + ?Sized>(n: usize, m: usize, rng: &mut R) -> NetworkGraph {
    let mut degree = vec![0usize; n];
    let mut edges = Vec::new();

    for new in 1..n {
        let wanted = m.min(new);
        let mut chosen: Vec<usize> = Vec::with_capacity(wanted);

        while chosen.len() < wanted {
            let total: usize = (0..new)
                .filter(|c| !chosen.contains(c))
                .map(|c| degree[c] + 1)
                .sum();
            let mut pick = rng.gen_range(0..total);
            let target = (0..new)
                .filter(|c| !chosen.contains(c))
                .find(|&c| {
                    let weight = degree[c] + 1;
                    if pick < weight {
                        true
                    } else {
                        pick -= weight;
                        false
                    }
                })
                .unwrap_or(new - 1);
            chosen.push(target);
        }

        for target in chosen {
            degree[target] += 1;
            degree[new] += 1;
            edges.push(GraphEdge::new(new as u64, target as u64, 1.0));
        }
    }

    NetworkGraph::new(bare_nodes(n), edges)
}

/// Node 0 joined to every other node.
pub fn star(n: usize) -> NetworkGraph {
    let edges = (1..n as u64).map(|leaf| GraphEdge::new(0, leaf, 1.0)).collect();
    NetworkGraph::new(bare_nodes(n), edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_erdos_renyi_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(erdos_renyi(10, 0.0, &mut rng).edge_count(), 0);
        assert_eq!(erdos_renyi(10, 1.0, &mut rng).edge_count(), 45);
    }

    #[test]
    fn test_erdos_renyi_is_reproducible() {
        let a = erdos_renyi(30, 0.3, &mut StdRng::seed_from_u64(11));
        let b = erdos_renyi(30, 0.3, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }

    #[test]
    fn test_barabasi_albert_edge_count_and_simplicity() {
        let mut rng = StdRng::seed_from_u64(3);
        let graph = barabasi_albert(20, 2, &mut rng);

        // Node 1 can only attach once, every later node attaches twice.
        assert_eq!(graph.edge_count(), 1 + 18 * 2);

        let mut seen = HashSet::new();
        for edge in &graph.edges {
            assert_ne!(edge.source, edge.target);
            let key = (edge.source.0.min(edge.target.0), edge.source.0.max(edge.target.0));
            assert!(seen.insert(key), "duplicate edge {:?}", key);
        }
    }

    #[test]
    fn test_barabasi_albert_large_m_saturates() {
        let mut rng = StdRng::seed_from_u64(5);
        let graph = barabasi_albert(6, 100, &mut rng);
        assert_eq!(graph.edge_count(), 15);
    }

    #[test]
    fn test_star_shape() {
        let graph = star(5);
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 4);
        assert!(graph.edges.iter().all(|e| e.source.0 == 0));
    }

    #[test]
    fn test_single_node_graphs_have_no_edges() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(erdos_renyi(1, 1.0, &mut rng).edge_count(), 0);
        assert_eq!(barabasi_albert(1, 3, &mut rng).edge_count(), 0);
        assert_eq!(star(1).edge_count(), 0);
    }
}
