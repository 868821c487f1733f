//! Render command implementation.
//!
//! Builds one figure the same way the API does and returns it for printing.

use anyhow::{Context, Result};
use clap::Subcommand;
use netdash_core::Figure;
use netdash_views::{
    CentralityChoice, CollaborationView, ColorMode, DashboardConfig, ExplainParams, ExplainView,
    FlowView, GraphStyle, LabourView, SizeMode,
};

/// Which dataset to render.
#[derive(Subcommand, Debug)]
pub enum RenderTarget {
    /// Labour-market skill network.
    Labour {
        /// Colour mode key.
        #[arg(long, default_value = "louvain community")]
        color: ColorMode,

        /// Edge rank threshold in [0, 1].
        #[arg(long, default_value_t = 0.2)]
        threshold: f64,

        /// Size mode key.
        #[arg(long, default_value = "None")]
        size: SizeMode,
    },

    /// Information-flow network.
    Flow {
        /// Edge rank threshold in [0, 1].
        #[arg(long, default_value_t = 0.5)]
        threshold: f64,
    },

    /// Artist collaboration subgraph.
    Collaboration {
        /// Popularity threshold.
        #[arg(long, default_value_t = 0)]
        threshold: u32,
    },

    /// A fresh random graph.
    Explain {
        #[arg(long, default_value_t = 10)]
        nodes: usize,

        /// Edge probability.
        #[arg(long, default_value_t = 0.5)]
        prob: f64,

        #[arg(long, default_value = "erdos-renyi")]
        style: GraphStyle,

        #[arg(long, default_value = "None")]
        centrality: CentralityChoice,

        /// RNG seed (defaults to the configured seed).
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Execute the render command.
pub fn execute(config: &DashboardConfig, target: RenderTarget) -> Result<Figure> {
    let figure = match target {
        RenderTarget::Labour {
            color,
            threshold,
            size,
        } => {
            let path = config.labour_path();
            let mut view = LabourView::load(&path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            view.get_updated_figure(color, threshold, size)?.clone()
        }

        RenderTarget::Flow { threshold } => {
            let path = config
                .flow_path()
                .context("no flow snapshot configured (set flow-snapshot)")?;
            let mut view = FlowView::load(&path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            view.update_threshold(threshold)?.clone()
        }

        RenderTarget::Collaboration { threshold } => {
            let mut view = CollaborationView::load(
                &config.collaboration_path(),
                &config.centrality_table_path(),
            )
            .context("failed to load the collaboration dataset")?;
            eprintln!("{}", CollaborationView::notes(threshold));
            view.update_figure(threshold)?.clone()
        }

        RenderTarget::Explain {
            nodes,
            prob,
            style,
            centrality,
            seed,
        } => {
            let params = ExplainParams {
                nodes,
                probability: prob,
                style,
                centrality,
            };
            eprintln!("{}", params.notes());
            ExplainView::new(seed.or(config.explain_seed)).make_network(&params)?
        }
    };

    Ok(figure)
}
