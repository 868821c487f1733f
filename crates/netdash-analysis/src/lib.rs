//! Graph algorithms consumed by the netdash views.
//!
//! - [`generate`]: Erdős–Rényi, Barabási–Albert and star generators
//! - [`layout`]: Fruchterman-Reingold force-directed placement
//! - [`centrality`]: eigenvector, betweenness and closeness scores
//! - [`community`]: Louvain modularity optimisation
//!
//! Everything operates on `petgraph::graph::UnGraph` with `f64` edge weights
//! and returns values index-aligned with the graph's node indices.

pub mod centrality;
pub mod community;
pub mod generate;
pub mod layout;

pub use centrality::{betweenness, closeness, eigenvector, CentralityMeasure};
pub use community::{louvain, LouvainConfig};
pub use generate::{barabasi_albert, erdos_renyi, star};
pub use layout::{fruchterman_reingold, LayoutConfig};

use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;

/// Weighted adjacency list, one entry per edge direction.
pub(crate) fn adjacency<N>(graph: &UnGraph<N, f64>) -> Vec<Vec<(usize, f64)>> {
    let mut adj = vec![Vec::new(); graph.node_count()];
    for edge in graph.edge_references() {
        let (a, b) = (edge.source().index(), edge.target().index());
        adj[a].push((b, *edge.weight()));
        if a != b {
            adj[b].push((a, *edge.weight()));
        }
    }
    adj
}
