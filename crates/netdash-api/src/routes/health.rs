//! Health check endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::types::{ApiResponse, ApiState, HealthResponse};

/// Handler for GET /api/health
pub async fn health_handler(
    State(state): State<Arc<ApiState>>,
) -> Json<ApiResponse<HealthResponse>> {
    let labour_nodes = state.labour.lock().await.graph().node_count();
    let (collaboration_nodes, collaboration_thresholds) = {
        let view = state.collaboration.lock().await;
        (view.core().node_count(), view.thresholds())
    };

    let response = HealthResponse {
        status: "ok".to_string(),
        labour_nodes,
        collaboration_nodes,
        collaboration_thresholds,
        flow_enabled: state.flow.is_some(),
        genres_enabled: state.genres.is_some(),
    };
    Json(ApiResponse::new(response))
}
