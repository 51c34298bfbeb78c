// HTTP routes: the parsed status as JSON

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::worker::SnapshotStore;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) store: Arc<SnapshotStore>,
    pub(crate) config: AppConfig,
}

pub fn app(store: Arc<SnapshotStore>, config: AppConfig) -> Router {
    let state = AppState { store, config };
    Router::new()
        .route("/", get(|| async { "nagios-status: status.dat as JSON" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/status", get(http::status_handler)) // GET /api/status
        .route("/api/problems", get(http::problems_handler)) // GET /api/problems?ack=&mute=
        .route("/api/hosts/{host}", get(http::host_handler)) // GET /api/hosts/{host}
        .route("/api/diagnostics", get(http::diagnostics_handler)) // GET /api/diagnostics
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
