//! Random-graph explainer endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use netdash_core::Figure;
use netdash_views::{ExplainParams, ViewError};
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;
use crate::types::{ApiResponse, ApiState, ExplainNotes};

/// Query parameters for the explainer; absent values take the slider defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ExplainQuery {
    pub nodes: Option<usize>,
    pub prob: Option<f64>,
    pub style: Option<String>,
    pub centrality: Option<String>,
}

impl ExplainQuery {
    fn params(&self) -> Result<ExplainParams, ViewError> {
        let defaults = ExplainParams::default();
        let params = ExplainParams {
            nodes: self.nodes.unwrap_or(defaults.nodes),
            probability: self.prob.unwrap_or(defaults.probability),
            style: match &self.style {
                Some(key) => key.parse()?,
                None => defaults.style,
            },
            centrality: match &self.centrality {
                Some(key) => key.parse()?,
                None => defaults.centrality,
            },
        };
        params.validate()?;
        Ok(params)
    }
}

/// GET /api/explain?nodes=&prob=&style=&centrality=
pub async fn explain_handler(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ExplainQuery>,
) -> Result<Json<ApiResponse<Figure>>, ApiError> {
    let params = query.params()?;
    debug!(?params, "Explain request");
    let figure = state.explain.lock().await.make_network(&params)?;
    Ok(Json(ApiResponse::new(figure)))
}

/// GET /api/explain/notes?nodes=&prob=&style=&centrality=
pub async fn notes_handler(
    Query(query): Query<ExplainQuery>,
) -> Result<Json<ApiResponse<ExplainNotes>>, ApiError> {
    let params = query.params()?;
    Ok(Json(ApiResponse::new(ExplainNotes {
        selection: params.notes(),
        style: params.style.description().to_string(),
        centrality: params.centrality.description().to_string(),
    })))
}
