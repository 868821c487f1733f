//! Labour network endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use netdash_core::Figure;
use netdash_views::{ColorMode, SizeMode, ViewError};
use serde::Deserialize;
use tracing::warn;

use crate::error::ApiError;
use crate::types::{ApiResponse, ApiState, LabourNotes};

/// Query parameters for the labour figure. Absent values keep the current choice.
#[derive(Debug, Default, Deserialize)]
pub struct LabourQuery {
    /// Colour mode key.
    pub color: Option<String>,
    /// Edge rank threshold in [0, 1].
    pub threshold: Option<f64>,
    /// Proportion of edges to keep; used as `1 - keep` when `threshold` is absent.
    pub keep: Option<f64>,
    /// Size mode key.
    pub size: Option<String>,
}

fn parse_or<T>(key: Option<&str>, current: T) -> Result<T, ViewError>
where
    T: std::str::FromStr<Err = ViewError>,
{
    key.map(str::parse).transpose().map(|v| v.unwrap_or(current))
}

/// GET /api/labour?color=&threshold=&size=
pub async fn labour_handler(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<LabourQuery>,
) -> Result<Json<ApiResponse<Figure>>, ApiError> {
    let mut view = state.labour.lock().await;
    let current = view.state();

    let color: ColorMode = parse_or(query.color.as_deref(), current.color)?;
    let size: SizeMode = parse_or(query.size.as_deref(), current.size)?;
    let threshold = query
        .threshold
        .or(query.keep.map(|keep| 1.0 - keep))
        .unwrap_or(current.threshold);

    let figure = match view.get_updated_figure(color, threshold, size).cloned() {
        Ok(figure) => figure,
        Err(ViewError::DegenerateScale { attribute }) => {
            warn!(%attribute, "Degenerate size scale, falling back to uniform sizing");
            view.get_updated_figure(color, threshold, SizeMode::Uniform)?
                .clone()
        }
        Err(err) => return Err(err.into()),
    };

    Ok(Json(ApiResponse::new(figure)))
}

/// GET /api/labour/notes?color=&size=
pub async fn notes_handler(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<LabourQuery>,
) -> Result<Json<ApiResponse<LabourNotes>>, ApiError> {
    let current = state.labour.lock().await.state();
    let color: ColorMode = parse_or(query.color.as_deref(), current.color)?;
    let size: SizeMode = parse_or(query.size.as_deref(), current.size)?;

    Ok(Json(ApiResponse::new(LabourNotes {
        color: color.description().to_string(),
        size: size.description().to_string(),
    })))
}
