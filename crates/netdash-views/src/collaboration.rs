//! Artist collaboration network, cut down by popularity threshold.

use std::path::Path;

use netdash_core::{load_snapshot, CentralityTable, Figure, GraphNode, Marker, NetworkGraph};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ViewError, ViewResult};
use crate::incremental::{IncrementalView, ViewState};
use crate::modes::{ColorMode, SizeMode};
use crate::profile::{require_number, require_text, DatasetProfile};

pub const CENTRALITY_ATTRIBUTE: &str = "centrality";
pub const POPULARITY_ATTRIBUTE: &str = "Popularity";

/// Rendering rules for one induced collaboration subgraph.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollaborationProfile;

impl DatasetProfile for CollaborationProfile {
    fn name(&self) -> &'static str {
        "collaboration"
    }

    fn title(&self) -> &str {
        "Spotify Most Central Core"
    }

    fn color_modes(&self) -> &[ColorMode] {
        &[ColorMode::Centrality]
    }

    fn color_marker(&self, graph: &NetworkGraph, mode: ColorMode) -> ViewResult<Marker> {
        match mode {
            ColorMode::Centrality => Ok(Marker::scaled(
                10.0,
                graph.number_column(CENTRALITY_ATTRIBUTE)?,
                "Bluered",
                "Network<br>Centrality",
            )),
            other => Err(ViewError::invalid_mode("colour", other.key())),
        }
    }

    fn hover_text(&self, node: &GraphNode) -> ViewResult<String> {
        let artist = require_text(node, "Artist")?;
        let popularity = require_number(node, POPULARITY_ATTRIBUTE)? as i64;
        let followers = require_number(node, "Followers")? as i64;
        Ok(format!(
            "Name: {artist}<br>Popularity: {popularity}<br>Followers: {followers}"
        ))
    }

    fn uniform_size(&self) -> f64 {
        10.0
    }

    fn popularity_attribute(&self) -> Option<&str> {
        Some(POPULARITY_ATTRIBUTE)
    }
}

/// All edges, centrality colours, popularity sizes.
const SUBGRAPH_STATE: ViewState = ViewState {
    threshold: 0.0,
    color: ColorMode::Centrality,
    size: SizeMode::Popularity,
};

/// The core collaboration graph plus per-threshold allow-lists.
///
/// Each threshold induces a fresh subgraph; the most recent one is kept so
/// asking for the same threshold again is free.
#[derive(Debug)]
pub struct CollaborationView {
    core: NetworkGraph,
    table: CentralityTable,
    current: Option<(u32, IncrementalView<CollaborationProfile>)>,
}

impl CollaborationView {
    pub fn new(core: NetworkGraph, table: CentralityTable) -> Self {
        Self {
            core,
            table,
            current: None,
        }
    }

    pub fn load(snapshot: &Path, table: &Path) -> ViewResult<Self> {
        let core = load_snapshot(snapshot)?;
        let table = CentralityTable::load(table)?;
        info!(
            nodes = core.node_count(),
            thresholds = table.thresholds().len(),
            "Loaded collaboration network"
        );
        Ok(Self::new(core, table))
    }

    /// Induce the subgraph over the allow-list for `threshold` and attach
    /// each node's centrality. Node order follows the core graph.
    pub fn subgraph(&self, threshold: u32) -> ViewResult<NetworkGraph> {
        let bucket = self
            .table
            .bucket(threshold)
            .ok_or(ViewError::MissingThresholdBucket { threshold })?;

        let mut graph = self.core.induced_subgraph(|node| bucket.contains_key(&node.name));
        for node in &mut graph.nodes {
            if let Some(&centrality) = bucket.get(&node.name) {
                node.attributes
                    .insert(CENTRALITY_ATTRIBUTE.to_string(), Value::from(centrality));
            }
        }
        Ok(graph)
    }

    /// Figure for `threshold`, rebuilt only when the threshold changes.
    pub fn update_figure(&mut self, threshold: u32) -> ViewResult<&Figure> {
        let cached = matches!(&self.current, Some((t, _)) if *t == threshold);
        if !cached {
            let graph = self.subgraph(threshold)?;
            debug!(
                threshold,
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "Induced collaboration subgraph"
            );
            let view = IncrementalView::initialize(CollaborationProfile, graph, SUBGRAPH_STATE)?;
            self.current = Some((threshold, view));
        }

        self.current
            .as_ref()
            .map(|(_, view)| view.figure())
            .ok_or(ViewError::MissingThresholdBucket { threshold })
    }

    /// Thresholds with a precomputed allow-list, ascending.
    pub fn thresholds(&self) -> Vec<u32> {
        self.table.thresholds()
    }

    pub fn current_threshold(&self) -> Option<u32> {
        self.current.as_ref().map(|(t, _)| *t)
    }

    pub fn core(&self) -> &NetworkGraph {
        &self.core
    }

    pub fn notes(threshold: u32) -> String {
        format!("You have selected a threshold of {threshold}")
    }
}
