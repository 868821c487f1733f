//! Prepare command implementation.
//!
//! Turns a raw graph into a dashboard snapshot: nodes without coordinates are
//! placed by force-directed layout, and community labels are optionally
//! attached for the labour colour mode.

use std::path::Path;

use anyhow::{Context, Result};
use netdash_analysis::{fruchterman_reingold, louvain, LayoutConfig, LouvainConfig};
use netdash_core::{read_graph, save_snapshot, NetworkGraph};
use netdash_views::labour::COMMUNITY_ATTRIBUTE;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Options for [`prepare_graph`].
#[derive(Debug, Clone)]
pub struct PrepareOptions {
    pub seed: Option<u64>,
    pub iterations: usize,
    pub weighted: bool,
    pub communities: bool,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            seed: None,
            iterations: LayoutConfig::default().iterations,
            weighted: false,
            communities: false,
        }
    }
}

/// Execute the prepare command.
pub fn execute(input: &Path, output: &Path, options: &PrepareOptions) -> Result<()> {
    let graph =
        read_graph(input).with_context(|| format!("failed to read {}", input.display()))?;

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let graph = prepare_graph(graph, options, &mut rng);

    save_snapshot(&graph, output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "✅ Snapshot: {} nodes, {} edges -> {}",
        graph.node_count(),
        graph.edge_count(),
        output.display()
    );
    Ok(())
}

/// Place unpositioned nodes and attach community labels if asked.
///
/// Nodes that already carry coordinates keep them; they only seed the layout.
pub fn prepare_graph<R: Rng + ?Sized>(
    mut graph: NetworkGraph,
    options: &PrepareOptions,
    rng: &mut R,
) -> NetworkGraph {
    let petgraph = graph.to_petgraph();

    if !graph.has_layout() {
        let initial: Vec<Option<(f64, f64)>> =
            graph.nodes.iter().map(|node| node.position()).collect();
        let missing = initial.iter().filter(|p| p.is_none()).count();

        let config = LayoutConfig {
            iterations: options.iterations,
            weighted: options.weighted,
            ..LayoutConfig::default()
        };
        let positions = fruchterman_reingold(&petgraph, &config, Some(&initial), rng);

        for (node, (x, y)) in graph.nodes.iter_mut().zip(positions) {
            if node.position().is_none() {
                node.x = Some(x);
                node.y = Some(y);
            }
        }
        info!(missing, iterations = options.iterations, "Laid out nodes");
    }

    if options.communities {
        let labels = louvain(&petgraph, &LouvainConfig::default());
        let count = labels.iter().copied().max().map_or(0, |max| max + 1);
        graph.set_attribute_column(COMMUNITY_ATTRIBUTE, labels.into_iter().map(|l| l as u64));
        info!(communities = count, "Detected communities");
    }

    graph
}
