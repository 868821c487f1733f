//! Artist collaboration endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use netdash_core::Figure;
use netdash_views::genres::parse_eigenvector;
use netdash_views::{CollaborationView, GenreCentrality};
use serde::Deserialize;

use crate::error::ApiError;
use crate::types::{ApiResponse, ApiState};

#[derive(Debug, Default, Deserialize)]
pub struct CollaborationQuery {
    /// Popularity threshold; 0 when absent.
    pub threshold: Option<u32>,
}

/// GET /api/collaboration?threshold=
pub async fn collaboration_handler(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<CollaborationQuery>,
) -> Result<Json<ApiResponse<Figure>>, ApiError> {
    let mut view = state.collaboration.lock().await;
    let figure = view.update_figure(query.threshold.unwrap_or(0))?.clone();
    Ok(Json(ApiResponse::new(figure)))
}

/// GET /api/collaboration/notes?threshold=
pub async fn notes_handler(Query(query): Query<CollaborationQuery>) -> Json<ApiResponse<String>> {
    Json(ApiResponse::new(CollaborationView::notes(
        query.threshold.unwrap_or(0),
    )))
}

#[derive(Debug, Default, Deserialize)]
pub struct GenreQuery {
    /// Popularity threshold; 0 when absent.
    pub threshold: Option<u32>,
    /// `first` or `second`; `first` when absent.
    pub eigenvector: Option<String>,
}

/// GET /api/collaboration/genres?threshold=&eigenvector=
pub async fn genres_handler(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<GenreQuery>,
) -> Result<Json<ApiResponse<GenreCentrality>>, ApiError> {
    let genres = state
        .genres
        .as_ref()
        .ok_or(ApiError::DatasetDisabled { dataset: "genres" })?;
    let eigenvector = parse_eigenvector(query.eigenvector.as_deref().unwrap_or("first"))?;
    let result = genres.centrality(eigenvector, query.threshold.unwrap_or(0))?;
    Ok(Json(ApiResponse::new(result)))
}
