//! Load-time and structural errors for the graph model.

use std::path::PathBuf;
use thiserror::Error;

use crate::NodeId;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while loading or validating dataset graphs.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Snapshot or table file could not be read or written.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot is not valid JSON for a graph.
    #[error("failed to parse snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Centrality table is not valid CSV.
    #[error("failed to read centrality table {path}: {source}")]
    Table {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Two nodes share an id.
    #[error("duplicate node id {id}")]
    DuplicateNode { id: NodeId },

    /// An edge references a node that does not exist.
    #[error("edge {index} references unknown node {node}")]
    DanglingEdge { index: usize, node: NodeId },

    /// An edge weight is NaN or infinite.
    #[error("edge {index} has non-finite weight {weight}")]
    InvalidWeight { index: usize, weight: f64 },

    /// A node has no layout coordinates.
    #[error("node {id} has no layout position")]
    MissingPosition { id: NodeId },

    /// A node lacks an attribute the dataset needs.
    #[error("node {id} is missing attribute '{key}'")]
    MissingAttribute { id: NodeId, key: String },

    /// A precomputed rank is outside [0, 1].
    #[error("edge rank {index} is {value}, expected a value in [0, 1]")]
    InvalidRank { index: usize, value: f64 },

    /// Edge count and derived buffer length disagree.
    #[error("expected {expected} edge ranks, got {actual}")]
    RankLengthMismatch { expected: usize, actual: usize },
}
