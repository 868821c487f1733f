//! Behavioural properties of the incremental views.

use netdash_core::{EdgeRanks, GraphEdge, GraphNode, MarkerSize, NetworkGraph};
use netdash_views::{
    ColorMode, DatasetProfile, ExplainParams, ExplainView, IncrementalView, LabourProfile,
    LabourView, SizeMode, ViewError, ViewState,
};

// =============================================================================
// Fixtures
// =============================================================================

fn job(id: u64, total_pop: f64) -> GraphNode {
    GraphNode::new(id, format!("job{id}"))
        .with_position(id as f64, (id * id) as f64)
        .with_attribute("title", format!("Job {id}"))
        .with_attribute("louvain community", id % 2)
        .with_attribute("unemployment", id as f64 / 10.0)
        .with_attribute("total_pop", total_pop)
        .with_attribute("Females", 2.0)
        .with_attribute("Males", 2.0)
}

/// Five nodes on a path, edges ranked 0, 0.25, 0.5, 0.75, 1.
fn ranked_graph() -> (NetworkGraph, EdgeRanks) {
    let nodes = (0..5).map(|i| job(i, 10f64.powi(i as i32))).collect();
    let edges = vec![
        GraphEdge::new(0, 1, 1.0),
        GraphEdge::new(1, 2, 1.0),
        GraphEdge::new(2, 3, 1.0),
        GraphEdge::new(3, 4, 1.0),
        GraphEdge::new(4, 0, 1.0),
    ];
    let ranks = EdgeRanks::from_percentiles(vec![0.0, 0.25, 0.5, 0.75, 1.0]).unwrap();
    (NetworkGraph::new(nodes, edges), ranks)
}

fn labour_view() -> LabourView {
    let (graph, ranks) = ranked_graph();
    IncrementalView::with_edge_ranks(LabourProfile, graph, ranks, LabourView::INITIAL).unwrap()
}

fn labour_view_with_population(values: &[f64]) -> Result<LabourView, ViewError> {
    let nodes = values
        .iter()
        .enumerate()
        .map(|(i, &v)| job(i as u64, v))
        .collect();
    LabourView::from_graph(NetworkGraph::new(nodes, Vec::new()))
}

/// Kept edges as (x0, x1) pairs, which identify edges in the fixture.
fn kept_edges(view: &LabourView) -> Vec<(f64, f64)> {
    view.figure()
        .edges
        .x
        .chunks(3)
        .map(|c| (c[0].unwrap_or(f64::NAN), c[1].unwrap_or(f64::NAN)))
        .collect()
}

// =============================================================================
// Threshold
// =============================================================================

#[test]
fn test_update_threshold_is_idempotent() {
    let mut view = labour_view();
    view.update_threshold(0.4).unwrap();
    let first = serde_json::to_string(view.figure()).unwrap();
    view.update_threshold(0.4).unwrap();
    let second = serde_json::to_string(view.figure()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_lower_threshold_keeps_a_superset() {
    let mut view = labour_view();
    let thresholds = [0.0, 0.1, 0.25, 0.3, 0.5, 0.6, 0.75, 0.9, 1.0];
    let mut previous: Option<Vec<(f64, f64)>> = None;

    for t in thresholds {
        view.update_threshold(t).unwrap();
        let kept = kept_edges(&view);
        if let Some(prev) = &previous {
            assert!(kept.iter().all(|edge| prev.contains(edge)), "t = {t}");
        }
        previous = Some(kept);
    }
}

#[test]
fn test_threshold_boundaries() {
    let mut view = labour_view();
    // Only the rank-0 edge is dropped at 0.
    view.update_threshold(0.0).unwrap();
    assert_eq!(view.figure().edges.segment_count(), 4);

    view.update_threshold(1.0).unwrap();
    assert_eq!(view.figure().edges.segment_count(), 0);
    assert!(view.figure().edges.x.is_empty());
}

#[test]
fn test_scenario_a_half_threshold_keeps_top_two_ranks() {
    let mut view = labour_view();
    view.update_threshold(0.5).unwrap();
    // Edges 3 -> 4 and 4 -> 0 carry ranks 0.75 and 1.0.
    assert_eq!(kept_edges(&view), vec![(3.0, 4.0), (4.0, 0.0)]);
}

// =============================================================================
// Colour and size
// =============================================================================

#[test]
fn test_color_and_size_commute() {
    let mut a = labour_view();
    a.update_color(ColorMode::Unemployment).unwrap();
    a.update_size(SizeMode::Population).unwrap();

    let mut b = labour_view();
    b.update_size(SizeMode::Population).unwrap();
    b.update_color(ColorMode::Unemployment).unwrap();

    assert_eq!(a.figure().marker(), b.figure().marker());
    assert!(matches!(a.figure().marker().size, MarkerSize::PerNode(_)));
}

#[test]
fn test_scenario_b_all_zero_population_is_degenerate() {
    let mut view = labour_view_with_population(&[0.0, 0.0, 0.0]).unwrap();
    let before = view.figure().clone();
    assert!(matches!(
        view.update_size(SizeMode::Population),
        Err(ViewError::DegenerateScale { .. })
    ));
    assert_eq!(view.figure(), &before);
    assert_eq!(view.current_size(), SizeMode::Uniform);
}

#[test]
fn test_scenario_b_population_sizes_increase_to_thirty() {
    let mut view = labour_view_with_population(&[9.0, 99.0, 999.0]).unwrap();
    view.update_size(SizeMode::Population).unwrap();
    let MarkerSize::PerNode(sizes) = &view.figure().marker().size else {
        panic!("expected per-node sizes");
    };
    assert!(sizes.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(sizes[2], 30.0);
}

#[test]
fn test_scenario_c_unknown_colour_leaves_view_untouched() {
    let mut view = labour_view();
    let before = view.figure().marker().clone();

    let parsed = "rainbow".parse::<ColorMode>();
    assert!(matches!(parsed, Err(ViewError::InvalidMode { .. })));

    // A known mode the dataset does not render fails the same way.
    assert!(matches!(
        view.update_color(ColorMode::Centrality),
        Err(ViewError::InvalidMode { .. })
    ));
    assert_eq!(view.current_color(), ColorMode::Community);
    assert_eq!(view.figure().marker(), &before);
}

// =============================================================================
// Composition
// =============================================================================

#[test]
fn test_get_updated_figure_round_trip() {
    let mut view = labour_view();
    let first = view
        .get_updated_figure(ColorMode::Unemployment, 0.3, SizeMode::Population)
        .unwrap()
        .clone();
    let second = view
        .get_updated_figure(ColorMode::Unemployment, 0.3, SizeMode::Population)
        .unwrap()
        .clone();
    assert_eq!(first, second);
}

#[test]
fn test_get_updated_figure_matches_sequential_updates() {
    let mut composed = labour_view();
    composed
        .get_updated_figure(ColorMode::Unemployment, 0.6, SizeMode::Population)
        .unwrap();

    let mut stepwise = labour_view();
    stepwise.update_threshold(0.6).unwrap();
    stepwise.update_color(ColorMode::Unemployment).unwrap();
    stepwise.update_size(SizeMode::Population).unwrap();

    assert_eq!(composed.figure(), stepwise.figure());
    assert_eq!(composed.state(), stepwise.state());
}

#[test]
fn test_failed_composition_commits_nothing() {
    let mut view = labour_view();
    let before = view.figure().clone();
    let state = view.state();

    assert!(view
        .get_updated_figure(ColorMode::Bias, 0.9, SizeMode::Population)
        .is_err());
    assert!(view
        .get_updated_figure(ColorMode::Unemployment, -0.1, SizeMode::Population)
        .is_err());

    assert_eq!(view.figure(), &before);
    assert_eq!(view.state(), state);
}

#[test]
fn test_initial_state_is_deterministic() {
    let a = labour_view();
    let b = labour_view();
    assert_eq!(a.figure(), b.figure());
    assert_eq!(
        a.state(),
        ViewState {
            threshold: 0.2,
            color: ColorMode::Community,
            size: SizeMode::Uniform,
        }
    );
    assert_eq!(a.profile().title(), "Labour Network Visualization");
}

// =============================================================================
// Random graphs
// =============================================================================

#[test]
fn test_explain_view_replays_with_same_seed() {
    let params = ExplainParams::default();
    let mut a = ExplainView::new(Some(7));
    let mut b = ExplainView::new(Some(7));
    for _ in 0..2 {
        assert_eq!(
            a.make_network(&params).unwrap(),
            b.make_network(&params).unwrap()
        );
    }
}
