//! Fruchterman-Reingold force-directed layout.
//!
//! Naive O(n²) repulsion. Fine for the request-time random graphs (at most a
//! hundred nodes) and acceptable for offline snapshot preparation.

use petgraph::graph::UnGraph;
use rand::Rng;
use tracing::debug;

use crate::adjacency;

/// Parameters for [`fruchterman_reingold`].
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Number of iterations.
    pub iterations: usize,
    /// Ideal edge length.
    pub k: f64,
    /// Scale attraction by edge weight.
    pub weighted: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: 500,
            k: 1.0,
            weighted: false,
        }
    }
}

/// Compute 2D positions, index-aligned with the graph's nodes.
///
/// `initial` seeds the positions (missing entries are drawn uniformly at
/// random in a square of side `sqrt(n)`). The temperature starts at
/// `sqrt(n) / 10` and cools linearly to zero.
pub fn fruchterman_reingold<N, R: Rng + ?Sized>(
    graph: &UnGraph<N, f64>,
    config: &LayoutConfig,
    initial: Option<&[Option<(f64, f64)>]>,
    rng: &mut R,
) -> Vec<(f64, f64)> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }

    let side = (n as f64).sqrt();
    let mut positions: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            initial
                .and_then(|seed| seed.get(i).copied().flatten())
                .unwrap_or_else(|| {
                    (
                        rng.gen_range(-side / 2.0..=side / 2.0),
                        rng.gen_range(-side / 2.0..=side / 2.0),
                    )
                })
        })
        .collect();

    let adj = adjacency(graph);
    let k2 = config.k * config.k;
    let start_temperature = side / 10.0;

    for iteration in 0..config.iterations {
        let temperature =
            start_temperature * (1.0 - iteration as f64 / config.iterations.max(1) as f64);
        let mut displacement = vec![(0.0f64, 0.0f64); n];

        // Repulsion between every pair.
        for i in 0..n {
            for j in (i + 1)..n {
                let (dx, dy, dist) = separation(positions[i], positions[j], rng);
                let force = k2 / dist;
                let (fx, fy) = (dx / dist * force, dy / dist * force);
                displacement[i].0 += fx;
                displacement[i].1 += fy;
                displacement[j].0 -= fx;
                displacement[j].1 -= fy;
            }
        }

        // Attraction along edges; each direction pulls its own endpoint.
        for (i, neighbours) in adj.iter().enumerate() {
            for &(j, weight) in neighbours {
                if i == j {
                    continue;
                }
                let (dx, dy, dist) = separation(positions[i], positions[j], rng);
                let mut force = dist * dist / config.k;
                if config.weighted {
                    force *= weight.abs();
                }
                displacement[i].0 -= dx / dist * force;
                displacement[i].1 -= dy / dist * force;
            }
        }

        for (pos, (dx, dy)) in positions.iter_mut().zip(displacement) {
            let length = (dx * dx + dy * dy).sqrt();
            if length > 0.0 {
                let step = length.min(temperature);
                pos.0 += dx / length * step;
                pos.1 += dy / length * step;
            }
        }
    }

    debug!(nodes = n, iterations = config.iterations, "Layout finished");
    positions
}

/// Vector from `b` to `a` and its length, jittered apart when they coincide.
fn separation<R: Rng + ?Sized>(
    a: (f64, f64),
    b: (f64, f64),
    rng: &mut R,
) -> (f64, f64, f64) {
    let (mut dx, mut dy) = (a.0 - b.0, a.1 - b.1);
    let mut dist = (dx * dx + dy * dy).sqrt();
    if dist < 1e-9 {
        dx = rng.gen_range(-1e-3..1e-3);
        dy = rng.gen_range(-1e-3..1e-3);
        dist = (dx * dx + dy * dy).sqrt().max(1e-9);
    }
    (dx, dy, dist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn path(n: usize) -> UnGraph<(), f64> {
        let mut graph = UnGraph::new_undirected();
        let nodes: Vec<_> = (0..n).map(|_| graph.add_node(())).collect();
        for pair in nodes.windows(2) {
            graph.add_edge(pair[0], pair[1], 1.0);
        }
        graph
    }

    #[test]
    fn test_layout_is_finite_and_aligned() {
        let graph = path(12);
        let positions = fruchterman_reingold(
            &graph,
            &LayoutConfig::default(),
            None,
            &mut StdRng::seed_from_u64(9),
        );

        assert_eq!(positions.len(), 12);
        assert!(positions.iter().all(|p| p.0.is_finite() && p.1.is_finite()));
    }

    #[test]
    fn test_layout_is_deterministic_for_a_seed() {
        let graph = path(8);
        let config = LayoutConfig {
            iterations: 50,
            ..LayoutConfig::default()
        };
        let a = fruchterman_reingold(&graph, &config, None, &mut StdRng::seed_from_u64(1));
        let b = fruchterman_reingold(&graph, &config, None, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_linked_nodes_end_closer_than_isolated_node() {
        let mut graph = path(2);
        graph.add_node(());
        let positions = fruchterman_reingold(
            &graph,
            &LayoutConfig::default(),
            None,
            &mut StdRng::seed_from_u64(4),
        );
        let dist = |a: usize, b: usize| {
            let (dx, dy) = (positions[a].0 - positions[b].0, positions[a].1 - positions[b].1);
            (dx * dx + dy * dy).sqrt()
        };
        assert!(dist(0, 1) < dist(0, 2));
        assert!(dist(0, 1) < dist(1, 2));
    }

    #[test]
    fn test_zero_iterations_keeps_seed_positions() {
        let graph = path(2);
        let seed = [Some((3.0, 4.0)), Some((-1.0, 0.5))];
        let config = LayoutConfig {
            iterations: 0,
            ..LayoutConfig::default()
        };
        let positions = fruchterman_reingold(
            &graph,
            &config,
            Some(&seed[..]),
            &mut StdRng::seed_from_u64(0),
        );
        assert_eq!(positions, vec![(3.0, 4.0), (-1.0, 0.5)]);
    }

    #[test]
    fn test_empty_graph() {
        let graph: UnGraph<(), f64> = UnGraph::new_undirected();
        let positions = fruchterman_reingold(
            &graph,
            &LayoutConfig::default(),
            None,
            &mut StdRng::seed_from_u64(0),
        );
        assert!(positions.is_empty());
    }
}
