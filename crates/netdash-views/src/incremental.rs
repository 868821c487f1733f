//! The incremental two-layer view shared by every static dataset.
//!
//! A view owns its graph, the derived edge buffers and the current
//! [`Figure`]. Each update touches only the layer it affects and returns
//! early when the requested value is already applied. Every update first
//! computes its payload and only then mutates, so a failed call leaves the
//! view exactly as it was.

use std::collections::HashMap;

use netdash_core::{
    EdgeCoordBuffer, EdgeRanks, EdgeTrace, Figure, FigureLayout, Marker, MarkerSize,
    NetworkGraph, NodeTrace, Polyline,
};
use tracing::debug;

use crate::error::{ViewError, ViewResult};
use crate::modes::{ColorMode, SizeMode};
use crate::profile::DatasetProfile;

/// The three user-controlled parameters of a static view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub threshold: f64,
    pub color: ColorMode,
    pub size: SizeMode,
}

/// Incremental figure over a static graph.
#[derive(Debug, Clone)]
pub struct IncrementalView<P> {
    profile: P,
    graph: NetworkGraph,
    coords: EdgeCoordBuffer,
    ranks: EdgeRanks,
    state: ViewState,
    figure: Figure,
    markers: HashMap<ColorMode, Marker>,
    sizes: MarkerSize,
}

impl<P: DatasetProfile> IncrementalView<P> {
    /// Build the buffers, the colour cache and the initial figure.
    pub fn initialize(profile: P, graph: NetworkGraph, initial: ViewState) -> ViewResult<Self> {
        let ranks = EdgeRanks::from_weights(&graph.weights());
        Self::with_edge_ranks(profile, graph, ranks, initial)
    }

    /// Like [`initialize`](Self::initialize) with precomputed edge ranks.
    pub fn with_edge_ranks(
        profile: P,
        graph: NetworkGraph,
        ranks: EdgeRanks,
        initial: ViewState,
    ) -> ViewResult<Self> {
        if ranks.len() != graph.edge_count() {
            return Err(netdash_core::CoreError::RankLengthMismatch {
                expected: graph.edge_count(),
                actual: ranks.len(),
            }
            .into());
        }
        check_threshold(initial.threshold)?;

        let coords = EdgeCoordBuffer::from_graph(&graph)?;
        let positions = graph.positions()?;
        let hovertext = graph
            .nodes
            .iter()
            .map(|node| profile.hover_text(node))
            .collect::<ViewResult<Vec<_>>>()?;

        let mut markers = HashMap::with_capacity(profile.color_modes().len());
        for &mode in profile.color_modes() {
            markers.insert(mode, profile.color_marker(&graph, mode)?);
        }

        let marker = lookup_marker(&markers, initial.color)?;
        let sizes = profile.size_values(&graph, initial.size)?;
        let polyline = coords.polyline_where(|i| ranks.keeps(i, initial.threshold));

        let layout = FigureLayout::new(profile.title()).with_legend(profile.show_legend());
        let mut figure = Figure::new(
            EdgeTrace::new(polyline),
            NodeTrace::new(&positions, hovertext, marker),
            layout,
        );
        figure.set_marker_size(sizes.clone());

        debug!(
            dataset = profile.name(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            kept = figure.edges.segment_count(),
            "View initialized"
        );

        Ok(Self {
            profile,
            graph,
            coords,
            ranks,
            state: initial,
            figure,
            markers,
            sizes,
        })
    }

    /// Redraw the edge layer keeping edges ranked strictly above `threshold`.
    pub fn update_threshold(&mut self, threshold: f64) -> ViewResult<&Figure> {
        check_threshold(threshold)?;
        if threshold != self.state.threshold {
            let polyline = self.stage_polyline(threshold);
            self.commit_polyline(threshold, polyline);
        }
        Ok(&self.figure)
    }

    /// Swap in the cached marker for `mode`, then reassert the current size.
    pub fn update_color(&mut self, mode: ColorMode) -> ViewResult<&Figure> {
        if mode != self.state.color {
            let marker = lookup_marker(&self.markers, mode)?;
            self.commit_marker(mode, marker);
        }
        Ok(&self.figure)
    }

    /// Resize the node markers.
    pub fn update_size(&mut self, mode: SizeMode) -> ViewResult<&Figure> {
        if mode != self.state.size {
            let sizes = self.profile.size_values(&self.graph, mode)?;
            self.commit_sizes(mode, sizes);
        }
        Ok(&self.figure)
    }

    /// Threshold, then colour, then size; all or nothing.
    pub fn get_updated_figure(
        &mut self,
        color: ColorMode,
        threshold: f64,
        size: SizeMode,
    ) -> ViewResult<&Figure> {
        check_threshold(threshold)?;
        let polyline =
            (threshold != self.state.threshold).then(|| self.stage_polyline(threshold));
        let marker = if color != self.state.color {
            Some(lookup_marker(&self.markers, color)?)
        } else {
            None
        };
        let sizes = if size != self.state.size {
            Some(self.profile.size_values(&self.graph, size)?)
        } else {
            None
        };

        if let Some(polyline) = polyline {
            self.commit_polyline(threshold, polyline);
        }
        if let Some(marker) = marker {
            self.commit_marker(color, marker);
        }
        if let Some(sizes) = sizes {
            self.commit_sizes(size, sizes);
        }
        Ok(&self.figure)
    }

    fn stage_polyline(&self, threshold: f64) -> Polyline {
        let ranks = &self.ranks;
        self.coords.polyline_where(|i| ranks.keeps(i, threshold))
    }

    fn commit_polyline(&mut self, threshold: f64, polyline: Polyline) {
        let kept = polyline.segment_count();
        self.figure.set_edge_polyline(polyline);
        self.state.threshold = threshold;
        debug!(dataset = self.profile.name(), threshold, kept, "Edge layer updated");
    }

    fn commit_marker(&mut self, mode: ColorMode, marker: Marker) {
        self.figure.set_marker(marker);
        self.figure.set_marker_size(self.sizes.clone());
        self.state.color = mode;
        debug!(dataset = self.profile.name(), color = %mode, "Node colours updated");
    }

    fn commit_sizes(&mut self, mode: SizeMode, sizes: MarkerSize) {
        self.figure.set_marker_size(sizes.clone());
        self.sizes = sizes;
        self.state.size = mode;
        debug!(dataset = self.profile.name(), size = %mode, "Node sizes updated");
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn current_threshold(&self) -> f64 {
        self.state.threshold
    }

    pub fn current_color(&self) -> ColorMode {
        self.state.color
    }

    pub fn current_size(&self) -> SizeMode {
        self.state.size
    }

    pub fn graph(&self) -> &NetworkGraph {
        &self.graph
    }

    pub fn edge_ranks(&self) -> &EdgeRanks {
        &self.ranks
    }

    pub fn profile(&self) -> &P {
        &self.profile
    }
}

fn check_threshold(threshold: f64) -> ViewResult<()> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(ViewError::InvalidThreshold { value: threshold })
    }
}

fn lookup_marker(markers: &HashMap<ColorMode, Marker>, mode: ColorMode) -> ViewResult<Marker> {
    markers
        .get(&mode)
        .cloned()
        .ok_or_else(|| ViewError::invalid_mode("colour", mode.key()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use netdash_core::{GraphEdge, GraphNode, MarkerColor};

    /// Minimal dataset: one named colour mode, one numeric, log-scaled sizes.
    #[derive(Debug)]
    struct TestProfile;

    impl DatasetProfile for TestProfile {
        fn name(&self) -> &'static str {
            "test"
        }

        fn title(&self) -> &str {
            "Test"
        }

        fn color_modes(&self) -> &[ColorMode] {
            &[ColorMode::Community, ColorMode::Unemployment]
        }

        fn color_marker(&self, graph: &NetworkGraph, mode: ColorMode) -> ViewResult<Marker> {
            Ok(match mode {
                ColorMode::Community => {
                    Marker::named(10.0, vec!["#000".to_string(); graph.node_count()])
                }
                _ => Marker::scaled(10.0, vec![0.5; graph.node_count()], "RdBu", "Change"),
            })
        }

        fn hover_text(&self, node: &GraphNode) -> ViewResult<String> {
            Ok(node.name.clone())
        }

        fn uniform_size(&self) -> f64 {
            0.0
        }

        fn population_attribute(&self) -> Option<&str> {
            Some("pop")
        }
    }

    fn graph() -> NetworkGraph {
        let nodes = (0..3)
            .map(|i| {
                GraphNode::new(i, format!("n{i}"))
                    .with_position(i as f64, 0.0)
                    .with_attribute("pop", 10f64.powi(i as i32 + 1) - 1.0)
            })
            .collect();
        let edges = vec![
            GraphEdge::new(0, 1, 1.0),
            GraphEdge::new(1, 2, 2.0),
            GraphEdge::new(0, 2, 3.0),
        ];
        NetworkGraph::new(nodes, edges)
    }

    fn initial() -> ViewState {
        ViewState {
            threshold: 0.0,
            color: ColorMode::Community,
            size: SizeMode::Uniform,
        }
    }

    #[test]
    fn test_initialize_applies_initial_state() {
        let view = IncrementalView::initialize(TestProfile, graph(), initial()).unwrap();
        assert_eq!(view.figure().edges.segment_count(), 3);
        assert_eq!(view.figure().marker().size, MarkerSize::Fixed(0.0));
        assert!(matches!(
            view.figure().marker().color,
            Some(MarkerColor::Named(_))
        ));
        assert_eq!(view.figure().layout.title, "Test");
    }

    #[test]
    fn test_threshold_keeps_strictly_higher_ranks() {
        let mut view = IncrementalView::initialize(TestProfile, graph(), initial()).unwrap();
        // Ranks are 1/3, 2/3, 1.
        let figure = view.update_threshold(2.0 / 3.0).unwrap();
        assert_eq!(figure.edges.segment_count(), 1);
        assert_eq!(figure.edges.x, vec![Some(0.0), Some(2.0), None]);
    }

    #[test]
    fn test_invalid_threshold_is_rejected() {
        let mut view = IncrementalView::initialize(TestProfile, graph(), initial()).unwrap();
        let before = view.figure().clone();
        assert!(matches!(
            view.update_threshold(1.5),
            Err(ViewError::InvalidThreshold { .. })
        ));
        assert!(view.update_threshold(f64::NAN).is_err());
        assert_eq!(view.figure(), &before);
        assert_eq!(view.current_threshold(), 0.0);
    }

    #[test]
    fn test_color_swap_keeps_size() {
        let mut view = IncrementalView::initialize(TestProfile, graph(), initial()).unwrap();
        view.update_size(SizeMode::Population).unwrap();
        let sized = view.figure().marker().size.clone();

        view.update_color(ColorMode::Unemployment).unwrap();
        assert_eq!(view.figure().marker().size, sized);
        assert_eq!(view.figure().marker().colorscale.as_deref(), Some("RdBu"));
    }

    #[test]
    fn test_uncached_color_mode_is_invalid() {
        let mut view = IncrementalView::initialize(TestProfile, graph(), initial()).unwrap();
        assert!(matches!(
            view.update_color(ColorMode::Bias),
            Err(ViewError::InvalidMode { .. })
        ));
        assert_eq!(view.current_color(), ColorMode::Community);
    }

    #[test]
    fn test_unsupported_size_mode_is_invalid() {
        let mut view = IncrementalView::initialize(TestProfile, graph(), initial()).unwrap();
        assert!(matches!(
            view.update_size(SizeMode::Popularity),
            Err(ViewError::InvalidMode { .. })
        ));
        assert_eq!(view.current_size(), SizeMode::Uniform);
    }

    #[test]
    fn test_get_updated_figure_is_atomic() {
        let mut view = IncrementalView::initialize(TestProfile, graph(), initial()).unwrap();
        let before = view.figure().clone();

        // Valid threshold and colour, unsupported size.
        let result = view.get_updated_figure(ColorMode::Unemployment, 0.5, SizeMode::Popularity);
        assert!(result.is_err());
        assert_eq!(view.figure(), &before);
        assert_eq!(view.state(), initial());
    }

    #[test]
    fn test_rank_length_mismatch() {
        let ranks = EdgeRanks::from_percentiles(vec![0.5]).unwrap();
        let err = IncrementalView::with_edge_ranks(TestProfile, graph(), ranks, initial())
            .unwrap_err();
        assert!(matches!(
            err,
            ViewError::Core(netdash_core::CoreError::RankLengthMismatch { .. })
        ));
    }
}
