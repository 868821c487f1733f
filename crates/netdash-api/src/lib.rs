//! REST API serving netdash figures.
//!
//! Every figure endpoint returns a Plotly-compatible `{data, layout}` object
//! wrapped in [`ApiResponse`].
//!
//! ## Endpoints
//!
//! - `GET /api/health` - Loaded datasets and node counts
//! - `GET /api/labour?color=&threshold=&keep=&size=` - Labour network figure
//! - `GET /api/labour/notes?color=&size=` - Explanations for the dropdowns
//! - `GET /api/flow?threshold=` - Information-flow figure (when configured)
//! - `GET /api/collaboration?threshold=` - Artist collaboration subgraph
//! - `GET /api/collaboration/notes?threshold=` - Selected threshold text
//! - `GET /api/collaboration/genres?threshold=&eigenvector=first|second` -
//!   Mean centrality per genre, with the top genre at the threshold
//! - `GET /api/explain?nodes=&prob=&style=&centrality=` - Fresh random graph
//! - `GET /api/explain/notes?...` - Explanatory text for the random graph
//!
//! ## Usage
//!
//! ```rust,no_run
//! use netdash_api::{create_api_router, create_api_state};
//! use netdash_views::{Dashboard, DashboardConfig};
//!
//! let config = DashboardConfig::load().unwrap();
//! let dashboard = Dashboard::load(&config).unwrap();
//! let router = create_api_router(create_api_state(dashboard));
//! ```

mod error;
mod routes;
mod types;

pub use error::ApiError;
pub use routes::create_api_router;
pub use types::{ApiResponse, ApiState, ErrorResponse, ExplainNotes, HealthResponse, LabourNotes};

use std::sync::Arc;

use netdash_views::Dashboard;
use tokio::sync::Mutex;

/// Wrap each dashboard view in its own lock.
pub fn create_api_state(dashboard: Dashboard) -> Arc<ApiState> {
    let Dashboard {
        labour,
        collaboration,
        flow,
        genres,
        explain,
    } = dashboard;
    Arc::new(ApiState {
        labour: Mutex::new(labour),
        collaboration: Mutex::new(collaboration),
        flow: flow.map(Mutex::new),
        genres,
        explain: Mutex::new(explain),
    })
}
