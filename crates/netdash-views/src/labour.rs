//! Labour-market skill-similarity network.

use std::path::Path;

use netdash_core::{load_snapshot, GraphNode, Marker, NetworkGraph};
use tracing::info;

use crate::error::{ViewError, ViewResult};
use crate::incremental::{IncrementalView, ViewState};
use crate::modes::{ColorMode, SizeMode};
use crate::profile::{require_number, require_text, DatasetProfile};

/// Five-step diverging palette indexed by community label.
pub const PORTLAND: [&str; 5] = ["#0c3383", "#0a88ba", "#f2d338", "#f28f38", "#d91e1e"];

pub const COMMUNITY_ATTRIBUTE: &str = "louvain community";
pub const POPULATION_ATTRIBUTE: &str = "total_pop";

const MARKER_SIZE: f64 = 10.0;

/// Rendering rules for the labour dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabourProfile;

impl DatasetProfile for LabourProfile {
    fn name(&self) -> &'static str {
        "labour"
    }

    fn title(&self) -> &str {
        "Labour Network Visualization"
    }

    fn color_modes(&self) -> &[ColorMode] {
        &[ColorMode::Community, ColorMode::Unemployment]
    }

    fn color_marker(&self, graph: &NetworkGraph, mode: ColorMode) -> ViewResult<Marker> {
        match mode {
            ColorMode::Community => {
                let colors = graph
                    .number_column(COMMUNITY_ATTRIBUTE)?
                    .into_iter()
                    .map(community_color)
                    .collect::<ViewResult<Vec<_>>>()?;
                Ok(Marker::named(MARKER_SIZE, colors))
            }
            ColorMode::Unemployment => Ok(Marker::scaled(
                MARKER_SIZE,
                graph.number_column("unemployment")?,
                "RdBu",
                "Percentage<br>Employment<br>Change",
            )),
            other => Err(ViewError::invalid_mode("colour", other.key())),
        }
    }

    fn hover_text(&self, node: &GraphNode) -> ViewResult<String> {
        let title = require_text(node, "title")?;
        let total_pop = require_number(node, POPULATION_ATTRIBUTE)?;
        let females = require_number(node, "Females")?;
        let males = require_number(node, "Males")?;
        Ok(format!(
            "{title}<br>Employed in Aus (1000's): {total_pop:.2}<br>Percentage Females: {:.3}",
            females / (males + females)
        ))
    }

    fn uniform_size(&self) -> f64 {
        0.0
    }

    fn population_attribute(&self) -> Option<&str> {
        Some(POPULATION_ATTRIBUTE)
    }
}

/// Palette entry for a community label. Labels must be non-negative integers.
fn community_color(label: f64) -> ViewResult<String> {
    if !label.is_finite() || label < 0.0 || label.fract() != 0.0 {
        return Err(ViewError::invalid_parameter(
            COMMUNITY_ATTRIBUTE,
            format!("{label} is not a community label"),
        ));
    }
    Ok(PORTLAND[label as usize % PORTLAND.len()].to_string())
}

pub type LabourView = IncrementalView<LabourProfile>;

impl IncrementalView<LabourProfile> {
    /// Threshold 0.2, community colours, hidden markers.
    pub const INITIAL: ViewState = ViewState {
        threshold: 0.2,
        color: ColorMode::Community,
        size: SizeMode::Uniform,
    };

    pub fn from_graph(graph: NetworkGraph) -> ViewResult<Self> {
        Self::initialize(LabourProfile, graph, Self::INITIAL)
    }

    pub fn load(path: &Path) -> ViewResult<Self> {
        let view = Self::from_graph(load_snapshot(path)?)?;
        info!(
            path = %path.display(),
            nodes = view.graph().node_count(),
            "Loaded labour network"
        );
        Ok(view)
    }
}
