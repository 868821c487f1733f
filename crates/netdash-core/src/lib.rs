//! Core domain types shared across the netdash workspace.
//!
//! A [`NetworkGraph`] is loaded once from a snapshot and never changes shape
//! afterwards. Views derive two buffers from it ([`EdgeCoordBuffer`] and
//! [`EdgeRanks`]) and render into a two-layer [`Figure`].

mod buffers;
mod error;
mod figure;
mod snapshot;

pub use buffers::{EdgeCoordBuffer, EdgeRanks, EdgeSegment, Polyline};
pub use error::{CoreError, CoreResult};
pub use figure::{
    AxisStyle, ColorBar, EdgeTrace, Figure, FigureLayout, LineStyle, Margin, Marker, MarkerColor,
    MarkerSize, NodeTrace,
};
pub use snapshot::{
    load_snapshot, read_graph, save_snapshot, CentralityTable, Eigenvector, GenreCentralityTable,
};

use petgraph::graph::UnGraph;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Identifier for nodes within a [`NetworkGraph`].
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node with its precomputed layout position and dataset attributes.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique identifier for this node.
    pub id: NodeId,
    /// Name used for allow-list lookups and hover text.
    #[serde(default)]
    pub name: String,
    /// Horizontal layout coordinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Vertical layout coordinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Dataset attributes (population, community label, bias, ...).
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

impl GraphNode {
    /// Create a node without a position or attributes.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: NodeId(id),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the layout position.
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Attach an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Layout position, if both coordinates are present.
    pub fn position(&self) -> Option<(f64, f64)> {
        self.x.zip(self.y)
    }

    /// Numeric attribute. Numeric strings are accepted too.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.attributes.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Attribute rendered as display text.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.attributes.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

fn default_weight() -> f64 {
    1.0
}

/// An undirected, weighted connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// One endpoint.
    pub source: NodeId,
    /// The other endpoint.
    pub target: NodeId,
    /// Similarity / flow / collaboration strength.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl GraphEdge {
    /// Create an edge with the given weight.
    pub fn new(source: u64, target: u64, weight: f64) -> Self {
        Self {
            source: NodeId(source),
            target: NodeId(target),
            weight,
        }
    }
}

/// A dataset graph: fixed nodes, weighted edges and free-form metadata.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkGraph {
    /// All nodes, in snapshot order.
    pub nodes: Vec<GraphNode>,
    /// All edges, in snapshot order.
    pub edges: Vec<GraphEdge>,
    /// Arbitrary metadata about the snapshot.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl NetworkGraph {
    /// Creates an empty graph with no nodes or edges.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a graph from nodes and edges.
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Self {
            nodes,
            edges,
            metadata: BTreeMap::new(),
        }
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Map from node id to its position in `nodes`.
    pub fn index_by_id(&self) -> HashMap<NodeId, usize> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id, idx))
            .collect()
    }

    /// Raw edge weights, index-aligned with `edges`.
    pub fn weights(&self) -> Vec<f64> {
        self.edges.iter().map(|e| e.weight).collect()
    }

    /// Check structural integrity: unique ids, known endpoints, finite weights.
    pub fn validate(&self) -> CoreResult<()> {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(node.id) {
                return Err(CoreError::DuplicateNode { id: node.id });
            }
        }

        for (index, edge) in self.edges.iter().enumerate() {
            for endpoint in [edge.source, edge.target] {
                if !seen.contains(&endpoint) {
                    return Err(CoreError::DanglingEdge {
                        index,
                        node: endpoint,
                    });
                }
            }
            if !edge.weight.is_finite() {
                return Err(CoreError::InvalidWeight {
                    index,
                    weight: edge.weight,
                });
            }
        }

        Ok(())
    }

    /// Fail unless every node carries both layout coordinates.
    pub fn require_layout(&self) -> CoreResult<()> {
        match self.nodes.iter().find(|n| n.position().is_none()) {
            Some(node) => Err(CoreError::MissingPosition { id: node.id }),
            None => Ok(()),
        }
    }

    /// Returns true if every node has a layout position.
    pub fn has_layout(&self) -> bool {
        self.nodes.iter().all(|n| n.position().is_some())
    }

    /// Node positions in node order.
    pub fn positions(&self) -> CoreResult<Vec<(f64, f64)>> {
        self.nodes
            .iter()
            .map(|n| n.position().ok_or(CoreError::MissingPosition { id: n.id }))
            .collect()
    }

    /// Overwrite node positions, index-aligned with `nodes`.
    pub fn set_positions(&mut self, positions: &[(f64, f64)]) {
        for (node, &(x, y)) in self.nodes.iter_mut().zip(positions) {
            node.x = Some(x);
            node.y = Some(y);
        }
    }

    /// A numeric attribute column in node order.
    pub fn number_column(&self, key: &str) -> CoreResult<Vec<f64>> {
        self.nodes
            .iter()
            .map(|n| {
                n.number(key).ok_or_else(|| CoreError::MissingAttribute {
                    id: n.id,
                    key: key.to_string(),
                })
            })
            .collect()
    }

    /// A text attribute column in node order.
    pub fn text_column(&self, key: &str) -> CoreResult<Vec<String>> {
        self.nodes
            .iter()
            .map(|n| {
                n.text(key).ok_or_else(|| CoreError::MissingAttribute {
                    id: n.id,
                    key: key.to_string(),
                })
            })
            .collect()
    }

    /// Set one attribute on every node, index-aligned with `nodes`.
    pub fn set_attribute_column<I, V>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        for (node, value) in self.nodes.iter_mut().zip(values) {
            node.attributes.insert(key.to_string(), value.into());
        }
    }

    /// Induce the subgraph over the nodes accepted by `keep`.
    ///
    /// Node order and edge order follow the parent graph.
    pub fn induced_subgraph(&self, mut keep: impl FnMut(&GraphNode) -> bool) -> NetworkGraph {
        let nodes: Vec<GraphNode> = self.nodes.iter().filter(|n| keep(n)).cloned().collect();
        let kept: HashSet<NodeId> = nodes.iter().map(|n| n.id).collect();
        let edges = self
            .edges
            .iter()
            .filter(|e| kept.contains(&e.source) && kept.contains(&e.target))
            .cloned()
            .collect();

        NetworkGraph {
            nodes,
            edges,
            metadata: self.metadata.clone(),
        }
    }

    /// Convert to a petgraph `UnGraph` for analysis.
    ///
    /// Node indices follow `nodes` order; edges with unknown endpoints are skipped.
    pub fn to_petgraph(&self) -> UnGraph<NodeId, f64> {
        let mut graph = UnGraph::with_capacity(self.nodes.len(), self.edges.len());
        let index: Vec<_> = self.nodes.iter().map(|n| graph.add_node(n.id)).collect();
        let by_id = self.index_by_id();

        for edge in &self.edges {
            if let (Some(&a), Some(&b)) = (by_id.get(&edge.source), by_id.get(&edge.target)) {
                graph.add_edge(index[a], index[b], edge.weight);
            }
        }

        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn triangle() -> NetworkGraph {
        NetworkGraph::new(
            vec![
                GraphNode::new(1, "a").with_position(0.0, 0.0),
                GraphNode::new(2, "b").with_position(1.0, 0.0),
                GraphNode::new(3, "c").with_position(0.0, 1.0),
            ],
            vec![
                GraphEdge::new(1, 2, 0.5),
                GraphEdge::new(2, 3, 1.5),
                GraphEdge::new(3, 1, 2.5),
            ],
        )
    }

    #[test]
    fn test_validate_accepts_well_formed_graph() {
        assert!(triangle().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_dangling_edge() {
        let mut graph = triangle();
        graph.edges.push(GraphEdge::new(1, 42, 1.0));

        let err = graph.validate().unwrap_err();
        assert!(matches!(
            err,
            CoreError::DanglingEdge {
                index: 3,
                node: NodeId(42)
            }
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_node() {
        let mut graph = triangle();
        graph.nodes.push(GraphNode::new(2, "again"));
        assert!(matches!(
            graph.validate(),
            Err(CoreError::DuplicateNode { id: NodeId(2) })
        ));
    }

    #[test]
    fn test_validate_rejects_nan_weight() {
        let mut graph = triangle();
        graph.edges[0].weight = f64::NAN;
        assert!(matches!(
            graph.validate(),
            Err(CoreError::InvalidWeight { index: 0, .. })
        ));
    }

    #[test]
    fn test_require_layout_reports_first_unplaced_node() {
        let mut graph = triangle();
        graph.nodes[1].y = None;
        assert!(matches!(
            graph.require_layout(),
            Err(CoreError::MissingPosition { id: NodeId(2) })
        ));
    }

    #[test]
    fn test_number_accepts_numeric_strings() {
        let node = GraphNode::new(1, "a")
            .with_attribute("pop", json!(12.5))
            .with_attribute("label", json!("3"))
            .with_attribute("name", json!("Sales"));

        assert_eq!(node.number("pop"), Some(12.5));
        assert_eq!(node.number("label"), Some(3.0));
        assert_eq!(node.number("name"), None);
        assert_eq!(node.text("pop").as_deref(), Some("12.5"));
    }

    #[test]
    fn test_number_column_reports_missing_attribute() {
        let graph = triangle();
        let err = graph.number_column("total_pop").unwrap_err();
        assert!(matches!(err, CoreError::MissingAttribute { id: NodeId(1), .. }));
    }

    #[test]
    fn test_induced_subgraph_preserves_order() {
        let graph = triangle();
        let sub = graph.induced_subgraph(|n| n.name != "b");

        let names: Vec<_> = sub.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert_eq!(sub.edges, vec![GraphEdge::new(3, 1, 2.5)]);
    }

    #[test]
    fn test_to_petgraph_keeps_counts() {
        let graph = triangle().to_petgraph();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_snapshot_defaults_weight() {
        let graph: NetworkGraph = serde_json::from_value(json!({
            "nodes": [{ "id": 0, "x": 0.0, "y": 0.0 }, { "id": 1, "x": 1.0, "y": 1.0 }],
            "edges": [{ "source": 0, "target": 1 }]
        }))
        .unwrap();

        assert_eq!(graph.edges[0].weight, 1.0);
        assert!(graph.metadata.is_empty());
    }
}
