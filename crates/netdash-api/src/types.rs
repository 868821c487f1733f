//! API types and DTOs.

use std::time::{SystemTime, UNIX_EPOCH};

use netdash_views::{CollaborationView, ExplainView, FlowView, GenreCentralityView, LabourView};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Shared application state: one lock per view, so updates to the same
/// dataset serialize while different datasets proceed independently.
pub struct ApiState {
    pub labour: Mutex<LabourView>,
    pub collaboration: Mutex<CollaborationView>,
    /// `None` when the information-flow dataset is not configured.
    pub flow: Option<Mutex<FlowView>>,
    /// Read-only; `None` when no genre table is configured.
    pub genres: Option<GenreCentralityView>,
    pub explain: Mutex<ExplainView>,
}

/// Response wrapper with timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response data.
    pub data: T,
    /// Unix timestamp in milliseconds.
    pub timestamp: u64,
}

impl<T> ApiResponse<T> {
    /// Create a new API response with current timestamp.
    pub fn new(data: T) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self { data, timestamp }
    }
}

/// Error payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Nodes in the labour network.
    pub labour_nodes: usize,
    /// Nodes in the collaboration core graph.
    pub collaboration_nodes: usize,
    /// Popularity thresholds with a precomputed allow-list.
    pub collaboration_thresholds: Vec<u32>,
    /// Whether the information-flow dataset is loaded.
    pub flow_enabled: bool,
    /// Whether the genre centrality table is loaded.
    pub genres_enabled: bool,
}

/// Dropdown explanations for the labour view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabourNotes {
    pub color: String,
    pub size: String,
}

/// Explanatory text for the random-graph view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainNotes {
    /// "You have selected N nodes and an edge probability of P".
    pub selection: String,
    pub style: String,
    pub centrality: String,
}
