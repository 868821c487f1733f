//! API route handlers.

mod collaboration;
mod explain;
mod flow;
mod health;
mod labour;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::types::ApiState;

/// Create the API router with all endpoints.
pub fn create_api_router(state: Arc<ApiState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(health::health_handler))
        // Static datasets
        .route("/labour", get(labour::labour_handler))
        .route("/labour/notes", get(labour::notes_handler))
        .route("/flow", get(flow::flow_handler))
        .route("/collaboration", get(collaboration::collaboration_handler))
        .route("/collaboration/notes", get(collaboration::notes_handler))
        .route("/collaboration/genres", get(collaboration::genres_handler))
        // Random graphs
        .route("/explain", get(explain::explain_handler))
        .route("/explain/notes", get(explain::notes_handler))
        // Request tracing (enable with RUST_LOG=tower_http=info or higher)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
