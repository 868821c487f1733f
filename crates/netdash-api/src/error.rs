//! Mapping view errors onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use netdash_views::ViewError;
use thiserror::Error;
use tracing::error;

use crate::types::{ApiResponse, ErrorResponse};

/// Errors returned by the route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    View(#[from] ViewError),

    /// The dataset was not configured at start.
    #[error("dataset '{dataset}' is not enabled")]
    DatasetDisabled { dataset: &'static str },
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::DatasetDisabled { .. } => (StatusCode::NOT_FOUND, "DATASET_DISABLED"),
            ApiError::View(err) => match err {
                ViewError::InvalidMode { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_MODE"),
                ViewError::InvalidThreshold { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_THRESHOLD")
                }
                ViewError::InvalidParameter { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_PARAMETER")
                }
                ViewError::DegenerateScale { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "DEGENERATE_SCALE")
                }
                ViewError::MissingThresholdBucket { .. } => {
                    (StatusCode::NOT_FOUND, "MISSING_THRESHOLD_BUCKET")
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        let body = ErrorResponse {
            code: code.to_string(),
            message: self.to_string(),
        };
        (status, Json(ApiResponse::new(body))).into_response()
    }
}
