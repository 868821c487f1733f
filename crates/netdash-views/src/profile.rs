//! Per-dataset rendering rules plugged into [`IncrementalView`](crate::IncrementalView).

use netdash_core::{GraphNode, Marker, MarkerSize, NetworkGraph};

use crate::error::{ViewError, ViewResult};
use crate::modes::{ColorMode, SizeMode};
use crate::sizing::log_scaled;

/// What differs between the static datasets: title, hover text, the colour
/// modes on offer and how each size mode reads the graph.
pub trait DatasetProfile {
    /// Short dataset name used in logs.
    fn name(&self) -> &'static str;

    /// Figure title.
    fn title(&self) -> &str;

    fn show_legend(&self) -> bool {
        false
    }

    /// Colour modes this dataset renders, in cache-build order.
    fn color_modes(&self) -> &[ColorMode];

    /// Marker for one of [`color_modes`](Self::color_modes).
    fn color_marker(&self, graph: &NetworkGraph, mode: ColorMode) -> ViewResult<Marker>;

    /// Hover text for a single node.
    fn hover_text(&self, node: &GraphNode) -> ViewResult<String>;

    /// Constant marker size for [`SizeMode::Uniform`].
    fn uniform_size(&self) -> f64;

    /// Attribute log-scaled by [`SizeMode::Population`], if supported.
    fn population_attribute(&self) -> Option<&str> {
        None
    }

    /// Attribute divided by three for [`SizeMode::Popularity`], if supported.
    fn popularity_attribute(&self) -> Option<&str> {
        None
    }

    /// Marker sizes for `mode`.
    fn size_values(&self, graph: &NetworkGraph, mode: SizeMode) -> ViewResult<MarkerSize> {
        let unsupported = || ViewError::invalid_mode("size", mode.key());
        match mode {
            SizeMode::Uniform => Ok(MarkerSize::Fixed(self.uniform_size())),
            SizeMode::Population => {
                let attribute = self.population_attribute().ok_or_else(unsupported)?;
                let column = graph.number_column(attribute)?;
                Ok(MarkerSize::PerNode(log_scaled(&column, attribute)?))
            }
            SizeMode::Popularity => {
                let attribute = self.popularity_attribute().ok_or_else(unsupported)?;
                let column = graph.number_column(attribute)?;
                Ok(MarkerSize::PerNode(
                    column.into_iter().map(|p| p / 3.0).collect(),
                ))
            }
        }
    }
}

/// Attribute as display text, or a missing-attribute error.
pub(crate) fn require_text(node: &GraphNode, key: &str) -> ViewResult<String> {
    node.text(key).ok_or_else(|| missing(node, key))
}

/// Attribute as a number, or a missing-attribute error.
pub(crate) fn require_number(node: &GraphNode, key: &str) -> ViewResult<f64> {
    node.number(key).ok_or_else(|| missing(node, key))
}

fn missing(node: &GraphNode, key: &str) -> ViewError {
    netdash_core::CoreError::MissingAttribute {
        id: node.id,
        key: key.to_string(),
    }
    .into()
}
