//! News-source information-flow network.

use std::path::Path;

use netdash_core::{load_snapshot, GraphNode, Marker, NetworkGraph};
use tracing::info;

use crate::error::{ViewError, ViewResult};
use crate::incremental::{IncrementalView, ViewState};
use crate::modes::{ColorMode, SizeMode};
use crate::profile::{require_text, DatasetProfile};

const MARKER_SIZE: f64 = 10.0;

/// Rendering rules for the information-flow dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct InformationFlowProfile;

impl DatasetProfile for InformationFlowProfile {
    fn name(&self) -> &'static str {
        "flow"
    }

    fn title(&self) -> &str {
        "News Flow Visualization"
    }

    fn show_legend(&self) -> bool {
        true
    }

    fn color_modes(&self) -> &[ColorMode] {
        &[ColorMode::Bias]
    }

    fn color_marker(&self, graph: &NetworkGraph, mode: ColorMode) -> ViewResult<Marker> {
        match mode {
            ColorMode::Bias => Ok(Marker::named(MARKER_SIZE, graph.text_column("hex_color")?)),
            other => Err(ViewError::invalid_mode("colour", other.key())),
        }
    }

    fn hover_text(&self, node: &GraphNode) -> ViewResult<String> {
        Ok(format!("{}<br>Bias: {}", node.name, require_text(node, "bias")?))
    }

    fn uniform_size(&self) -> f64 {
        MARKER_SIZE
    }
}

pub type FlowView = IncrementalView<InformationFlowProfile>;

impl IncrementalView<InformationFlowProfile> {
    /// Threshold 0.5, bias colours, size 10.
    pub const INITIAL: ViewState = ViewState {
        threshold: 0.5,
        color: ColorMode::Bias,
        size: SizeMode::Uniform,
    };

    pub fn from_graph(graph: NetworkGraph) -> ViewResult<Self> {
        Self::initialize(InformationFlowProfile, graph, Self::INITIAL)
    }

    pub fn load(path: &Path) -> ViewResult<Self> {
        let view = Self::from_graph(load_snapshot(path)?)?;
        info!(
            path = %path.display(),
            nodes = view.graph().node_count(),
            "Loaded information flow network"
        );
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netdash_core::{GraphEdge, MarkerColor, MarkerSize};

    fn source(id: u64, bias: &str, color: &str) -> GraphNode {
        GraphNode::new(id, format!("Source {id}"))
            .with_position(0.0, id as f64)
            .with_attribute("bias", bias)
            .with_attribute("hex_color", color)
    }

    fn graph() -> NetworkGraph {
        NetworkGraph::new(
            vec![
                source(0, "left", "#0000ff"),
                source(1, "center", "#888888"),
                source(2, "right", "#ff0000"),
            ],
            vec![
                GraphEdge::new(0, 1, 5.0),
                GraphEdge::new(1, 2, 5.0),
                GraphEdge::new(0, 2, 1.0),
                GraphEdge::new(2, 0, 9.0),
            ],
        )
    }

    #[test]
    fn test_initial_figure() {
        let view = FlowView::from_graph(graph()).unwrap();
        let figure = view.figure();
        assert_eq!(figure.layout.title, "News Flow Visualization");
        assert!(figure.layout.showlegend);
        assert_eq!(figure.marker().size, MarkerSize::Fixed(10.0));
        assert_eq!(
            figure.marker().color,
            Some(MarkerColor::Named(vec![
                "#0000ff".to_string(),
                "#888888".to_string(),
                "#ff0000".to_string(),
            ]))
        );
        assert_eq!(figure.nodes.hovertext[0], "Source 0<br>Bias: left");
    }

    #[test]
    fn test_tied_weights_share_average_rank() {
        let view = FlowView::from_graph(graph()).unwrap();
        // Ranks: 5 -> 2.5, 1 -> 1, 9 -> 4; divided by 4.
        assert_eq!(view.edge_ranks().values(), &[0.625, 0.625, 0.25, 1.0]);
        // 0.5 keeps the tied pair and the heaviest edge.
        assert_eq!(view.figure().edges.segment_count(), 3);
    }

    #[test]
    fn test_population_size_is_not_offered() {
        let mut view = FlowView::from_graph(graph()).unwrap();
        assert!(matches!(
            view.update_size(SizeMode::Population),
            Err(ViewError::InvalidMode { .. })
        ));
    }
}
