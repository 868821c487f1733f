//! Two-layer figure model, serialized in the plotting library's JSON shape:
//! `{ "data": [edgeTrace, nodeTrace], "layout": { ... } }`.

use serde::{Deserialize, Serialize};

use crate::Polyline;

fn scatter() -> String {
    "scatter".to_string()
}

/// Line styling for the edge layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub width: f64,
    pub shape: String,
}

/// Layer 0: every visible edge drawn as a single gapped polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeTrace {
    #[serde(rename = "type", default = "scatter")]
    pub trace_type: String,
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
    pub mode: String,
    pub line: LineStyle,
    pub opacity: f64,
    pub hoverinfo: String,
}

impl EdgeTrace {
    /// Thin, translucent spline edges with hover disabled.
    pub fn new(polyline: Polyline) -> Self {
        Self {
            trace_type: scatter(),
            x: polyline.x,
            y: polyline.y,
            mode: "lines".to_string(),
            line: LineStyle {
                width: 0.2,
                shape: "spline".to_string(),
            },
            opacity: 0.5,
            hoverinfo: "none".to_string(),
        }
    }

    /// Number of edges currently drawn.
    pub fn segment_count(&self) -> usize {
        self.x.len() / 3
    }
}

/// Marker size: one value for all nodes or one per node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkerSize {
    Fixed(f64),
    PerNode(Vec<f64>),
}

/// Marker colour: numeric values mapped through a colour scale, or literal colours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkerColor {
    Numeric(Vec<f64>),
    Named(Vec<String>),
}

/// Colour bar shown beside numeric colour scales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorBar {
    pub thickness: f64,
    pub title: String,
}

impl ColorBar {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            thickness: 20.0,
            title: title.into(),
        }
    }
}

/// Marker descriptor for the node layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub size: MarkerSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<MarkerColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cauto: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colorbar: Option<ColorBar>,
}

impl Marker {
    /// Fixed-size marker with the renderer's default colour.
    pub fn plain(size: f64) -> Self {
        Self {
            size: MarkerSize::Fixed(size),
            color: None,
            cauto: None,
            colorscale: None,
            colorbar: None,
        }
    }

    /// Literal per-node colours.
    pub fn named(size: f64, colors: Vec<String>) -> Self {
        Self {
            color: Some(MarkerColor::Named(colors)),
            ..Self::plain(size)
        }
    }

    /// Numeric values auto-ranged through `colorscale`, with a titled colour bar.
    pub fn scaled(
        size: f64,
        values: Vec<f64>,
        colorscale: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            size: MarkerSize::Fixed(size),
            color: Some(MarkerColor::Numeric(values)),
            cauto: Some(true),
            colorscale: Some(colorscale.into()),
            colorbar: Some(ColorBar::titled(title)),
        }
    }
}

/// Layer 1: node markers at fixed positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTrace {
    #[serde(rename = "type", default = "scatter")]
    pub trace_type: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub hovertext: Vec<String>,
    pub text: Vec<String>,
    pub mode: String,
    pub textposition: String,
    pub hoverinfo: String,
    pub marker: Marker,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
}

impl NodeTrace {
    /// Markers with hover text.
    pub fn new(positions: &[(f64, f64)], hovertext: Vec<String>, marker: Marker) -> Self {
        Self {
            trace_type: scatter(),
            x: positions.iter().map(|p| p.0).collect(),
            y: positions.iter().map(|p| p.1).collect(),
            hovertext,
            text: Vec::new(),
            mode: "markers+text".to_string(),
            textposition: "bottom center".to_string(),
            hoverinfo: "text".to_string(),
            marker,
            showlegend: None,
        }
    }

    /// Bare markers with hover disabled.
    pub fn silent(positions: &[(f64, f64)], marker: Marker) -> Self {
        Self {
            mode: "markers".to_string(),
            hoverinfo: "none".to_string(),
            ..Self::new(positions, Vec::new(), marker)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub b: f64,
    pub l: f64,
    pub r: f64,
    pub t: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisStyle {
    pub showgrid: bool,
    pub zeroline: bool,
    pub showticklabels: bool,
}

impl AxisStyle {
    pub fn hidden() -> Self {
        Self {
            showgrid: false,
            zeroline: false,
            showticklabels: false,
        }
    }
}

/// Layout metadata handed to the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureLayout {
    pub title: String,
    pub showlegend: bool,
    pub hovermode: String,
    pub margin: Margin,
    pub xaxis: AxisStyle,
    pub yaxis: AxisStyle,
    pub height: u32,
    pub clickmode: String,
}

impl FigureLayout {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            showlegend: false,
            hovermode: "closest".to_string(),
            margin: Margin {
                b: 40.0,
                l: 40.0,
                r: 40.0,
                t: 40.0,
            },
            xaxis: AxisStyle::hidden(),
            yaxis: AxisStyle::hidden(),
            height: 600,
            clickmode: "event+select".to_string(),
        }
    }

    pub fn with_legend(mut self, show: bool) -> Self {
        self.showlegend = show;
        self
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct FigureRepr {
    data: (EdgeTrace, NodeTrace),
    layout: FigureLayout,
}

/// A two-layer figure: edges (layer 0), nodes (layer 1) and layout metadata.
///
/// Each layer has its own setter so callers replace only what changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FigureRepr", into = "FigureRepr")]
pub struct Figure {
    pub edges: EdgeTrace,
    pub nodes: NodeTrace,
    pub layout: FigureLayout,
}

impl From<FigureRepr> for Figure {
    fn from(repr: FigureRepr) -> Self {
        let (edges, nodes) = repr.data;
        Self {
            edges,
            nodes,
            layout: repr.layout,
        }
    }
}

impl From<Figure> for FigureRepr {
    fn from(figure: Figure) -> Self {
        Self {
            data: (figure.edges, figure.nodes),
            layout: figure.layout,
        }
    }
}

impl Figure {
    pub fn new(edges: EdgeTrace, nodes: NodeTrace, layout: FigureLayout) -> Self {
        Self {
            edges,
            nodes,
            layout,
        }
    }

    /// Replace the edge polyline (layer 0).
    pub fn set_edge_polyline(&mut self, polyline: Polyline) {
        self.edges.x = polyline.x;
        self.edges.y = polyline.y;
    }

    /// Swap the whole node marker (layer 1).
    pub fn set_marker(&mut self, marker: Marker) {
        self.nodes.marker = marker;
    }

    /// Replace only the node marker size (layer 1).
    pub fn set_marker_size(&mut self, size: MarkerSize) {
        self.nodes.marker.size = size;
    }

    pub fn marker(&self) -> &Marker {
        &self.nodes.marker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn sample() -> Figure {
        let polyline = Polyline {
            x: vec![Some(0.0), Some(1.0), None],
            y: vec![Some(0.0), Some(1.0), None],
        };
        Figure::new(
            EdgeTrace::new(polyline),
            NodeTrace::new(
                &[(0.0, 0.0), (1.0, 1.0)],
                vec!["a".into(), "b".into()],
                Marker::scaled(10.0, vec![0.1, 0.9], "RdBu", "Change"),
            ),
            FigureLayout::new("Sample"),
        )
    }

    #[test]
    fn test_serializes_as_layered_data_array() {
        let value = serde_json::to_value(sample()).unwrap();

        let data = value["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["mode"], json!("lines"));
        assert_eq!(data[0]["x"], json!([0.0, 1.0, null]));
        assert_eq!(data[0]["line"]["shape"], json!("spline"));
        assert_eq!(data[1]["marker"]["colorscale"], json!("RdBu"));
        assert_eq!(data[1]["marker"]["colorbar"]["thickness"], json!(20.0));
        assert_eq!(value["layout"]["height"], json!(600));
        assert_eq!(value["layout"]["xaxis"]["showticklabels"], json!(false));
    }

    #[test]
    fn test_plain_marker_omits_colour_fields() {
        let value = serde_json::to_value(Marker::plain(10.0)).unwrap();
        assert_eq!(value, json!({ "size": 10.0 }));
    }

    #[test]
    fn test_round_trips_through_json() {
        let figure = sample();
        let text = serde_json::to_string(&figure).unwrap();
        let back: Figure = serde_json::from_str(&text).unwrap();
        assert_eq!(back, figure);
    }

    #[test]
    fn test_marker_size_setter_keeps_colour() {
        let mut figure = sample();
        figure.set_marker_size(MarkerSize::PerNode(vec![3.0, 4.0]));

        assert_eq!(figure.marker().size, MarkerSize::PerNode(vec![3.0, 4.0]));
        assert_eq!(
            figure.marker().color,
            Some(MarkerColor::Numeric(vec![0.1, 0.9]))
        );
    }

    #[test]
    fn test_named_colours_serialize_as_strings() {
        let marker = Marker::named(10.0, vec!["#0c3383".into()]);
        let value: Value = serde_json::to_value(marker).unwrap();
        assert_eq!(value["color"], json!(["#0c3383"]));
    }
}
