//! Random-graph explainer: a fresh graph, layout and centrality per call.

use netdash_analysis::{barabasi_albert, erdos_renyi, fruchterman_reingold, star, LayoutConfig};
use netdash_core::{
    EdgeCoordBuffer, EdgeTrace, Figure, FigureLayout, Marker, NetworkGraph, NodeTrace,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::error::{ViewError, ViewResult};
use crate::modes::{CentralityChoice, GraphStyle};

pub const MAX_NODES: usize = 100;

const MARKER_SIZE: f64 = 10.0;

/// Inputs from the explainer's sliders and dropdowns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplainParams {
    pub nodes: usize,
    pub probability: f64,
    pub style: GraphStyle,
    pub centrality: CentralityChoice,
}

impl Default for ExplainParams {
    fn default() -> Self {
        Self {
            nodes: 10,
            probability: 0.5,
            style: GraphStyle::ErdosRenyi,
            centrality: CentralityChoice::None,
        }
    }
}

impl ExplainParams {
    pub fn validate(&self) -> ViewResult<()> {
        if !(1..=MAX_NODES).contains(&self.nodes) {
            return Err(ViewError::invalid_parameter(
                "nodes",
                format!("{} is outside 1..={MAX_NODES}", self.nodes),
            ));
        }
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(ViewError::invalid_parameter(
                "prob",
                format!("{} is outside [0, 1]", self.probability),
            ));
        }
        Ok(())
    }

    /// Edges attached per new node by the preferential-attachment generator.
    pub fn attachments(&self) -> usize {
        let n = self.nodes as f64;
        let m = (self.probability * (n * n / 2.0 - n)).floor();
        (m.max(0.0) as usize).max(1)
    }

    /// The line shown under the sliders.
    pub fn notes(&self) -> String {
        format!(
            "You have selected {} nodes and an edge probability of {:.1}",
            self.nodes, self.probability
        )
    }
}

/// Generates and lays out random graphs. Owns its RNG so a seeded view
/// replays the same sequence of graphs.
#[derive(Debug, Clone)]
pub struct ExplainView {
    rng: StdRng,
    layout: LayoutConfig,
}

impl ExplainView {
    /// Seeded when `seed` is given, from OS entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            layout: LayoutConfig::default(),
        }
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// A laid-out graph for `params`.
    pub fn generate(&mut self, params: &ExplainParams) -> ViewResult<NetworkGraph> {
        params.validate()?;
        let mut graph = match params.style {
            GraphStyle::ErdosRenyi => erdos_renyi(params.nodes, params.probability, &mut self.rng),
            GraphStyle::BarabasiAlbert => {
                barabasi_albert(params.nodes, params.attachments(), &mut self.rng)
            }
            GraphStyle::Star => star(params.nodes),
        };

        let positions =
            fruchterman_reingold(&graph.to_petgraph(), &self.layout, None, &mut self.rng);
        graph.set_positions(&positions);
        Ok(graph)
    }

    /// Build the whole figure from scratch.
    pub fn make_network(&mut self, params: &ExplainParams) -> ViewResult<Figure> {
        let graph = self.generate(params)?;
        let positions = graph.positions()?;
        let edges = EdgeCoordBuffer::from_graph(&graph)?;

        let marker = match params.centrality.measure() {
            Some(measure) => Marker::scaled(
                MARKER_SIZE,
                measure.compute(&graph.to_petgraph()),
                "Bluered",
                params.centrality.colorbar_title(),
            ),
            None => Marker::plain(MARKER_SIZE),
        };

        debug!(
            style = %params.style,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            centrality = %params.centrality,
            "Generated random graph"
        );

        Ok(Figure::new(
            EdgeTrace::new(edges.polyline()),
            NodeTrace::silent(&positions, marker),
            FigureLayout::new(params.style.key()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netdash_core::MarkerColor;

    fn fast() -> ExplainView {
        ExplainView::new(Some(42)).with_layout(LayoutConfig {
            iterations: 50,
            ..LayoutConfig::default()
        })
    }

    #[test]
    fn test_node_count_bounds() {
        let mut view = fast();
        for nodes in [0, MAX_NODES + 1] {
            let params = ExplainParams {
                nodes,
                ..ExplainParams::default()
            };
            assert!(matches!(
                view.make_network(&params),
                Err(ViewError::InvalidParameter { name: "nodes", .. })
            ));
        }
    }

    #[test]
    fn test_probability_bounds() {
        let params = ExplainParams {
            probability: 1.2,
            ..ExplainParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_attachments() {
        let params = |nodes, probability| ExplainParams {
            nodes,
            probability,
            ..ExplainParams::default()
        };
        // 0.5 * (50 - 10) = 20
        assert_eq!(params(10, 0.5).attachments(), 20);
        assert_eq!(params(1, 0.5).attachments(), 1);
        assert_eq!(params(10, 0.0).attachments(), 1);
    }

    #[test]
    fn test_star_figure() {
        let params = ExplainParams {
            nodes: 6,
            style: GraphStyle::Star,
            ..ExplainParams::default()
        };
        let figure = fast().make_network(&params).unwrap();
        assert_eq!(figure.edges.segment_count(), 5);
        assert_eq!(figure.nodes.x.len(), 6);
        assert_eq!(figure.nodes.mode, "markers");
        assert_eq!(figure.nodes.hoverinfo, "none");
        assert_eq!(figure.layout.title, "Star Graph");
        assert_eq!(figure.marker(), &Marker::plain(10.0));
    }

    #[test]
    fn test_eigenvector_overlay() {
        let params = ExplainParams {
            centrality: CentralityChoice::Eigenvector,
            ..ExplainParams::default()
        };
        let figure = fast().make_network(&params).unwrap();
        let marker = figure.marker();
        assert_eq!(marker.colorscale.as_deref(), Some("Bluered"));
        assert_eq!(
            marker.colorbar.as_ref().map(|bar| bar.title.as_str()),
            Some("Eigenvector<br>Centrality")
        );
        let Some(MarkerColor::Numeric(scores)) = &marker.color else {
            panic!("expected numeric colours");
        };
        assert_eq!(scores.len(), 10);
    }

    #[test]
    fn test_same_seed_same_figure() {
        let params = ExplainParams {
            style: GraphStyle::BarabasiAlbert,
            nodes: 15,
            probability: 0.1,
            ..ExplainParams::default()
        };
        let a = fast().make_network(&params).unwrap();
        let b = fast().make_network(&params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_notes() {
        assert_eq!(
            ExplainParams::default().notes(),
            "You have selected 10 nodes and an edge probability of 0.5"
        );
    }
}
