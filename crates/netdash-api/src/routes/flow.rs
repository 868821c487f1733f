//! Information-flow network endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use netdash_core::Figure;
use serde::Deserialize;

use crate::error::ApiError;
use crate::types::{ApiResponse, ApiState};

#[derive(Debug, Default, Deserialize)]
pub struct FlowQuery {
    /// Edge rank threshold in [0, 1]; the current one when absent.
    pub threshold: Option<f64>,
}

/// GET /api/flow?threshold=
pub async fn flow_handler(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<FlowQuery>,
) -> Result<Json<ApiResponse<Figure>>, ApiError> {
    let flow = state
        .flow
        .as_ref()
        .ok_or(ApiError::DatasetDisabled { dataset: "flow" })?;
    let mut view = flow.lock().await;
    let threshold = query.threshold.unwrap_or(view.current_threshold());
    let figure = view.update_threshold(threshold)?.clone();
    Ok(Json(ApiResponse::new(figure)))
}
