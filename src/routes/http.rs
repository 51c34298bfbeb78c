// GET handlers: version, status, problems, hosts, diagnostics

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::AppState;
use crate::models::StatusSnapshot;
use crate::report::{ProblemFilter, problems};

/// GET /version — service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/status — the whole snapshot.
pub(super) async fn status_handler(State(state): State<AppState>) -> Response {
    match loaded(&state).await {
        Ok(snapshot) => Json(snapshot.as_ref()).into_response(),
        Err(resp) => resp,
    }
}

/// GET /api/problems — non-OK hosts and services; `ack`/`mute` widen the filter.
pub(super) async fn problems_handler(
    State(state): State<AppState>,
    Query(filter): Query<ProblemFilter>,
) -> Response {
    match loaded(&state).await {
        Ok(snapshot) => Json(problems(&snapshot, filter)).into_response(),
        Err(resp) => resp,
    }
}

/// GET /api/hosts/{host} — one host with its services.
pub(super) async fn host_handler(
    State(state): State<AppState>,
    Path(host): Path<String>,
) -> Response {
    let snapshot = match loaded(&state).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match snapshot.host(&host) {
        Some(record) => Json(record).into_response(),
        None => (StatusCode::NOT_FOUND, format!("unknown host: {host}")).into_response(),
    }
}

/// GET /api/diagnostics — blocks dropped by the last parse.
pub(super) async fn diagnostics_handler(State(state): State<AppState>) -> Response {
    match loaded(&state).await {
        Ok(snapshot) => Json(snapshot.diagnostics()).into_response(),
        Err(resp) => resp,
    }
}

async fn loaded(state: &AppState) -> Result<Arc<StatusSnapshot>, Response> {
    state.store.latest().await.ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            format!("status not loaded yet from {}", state.config.status.path),
        )
            .into_response()
    })
}
