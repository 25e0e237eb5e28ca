use axum::extract::State;
use axum::{routing::get, Json, Router};
use folio_repository::LoadStatus;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status: `ok` or `degraded`.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the project store is reachable.
    pub store_healthy: bool,
    /// Load status of the local project list.
    pub projects_status: LoadStatus,
    /// Number of projects in the local list.
    pub project_count: usize,
}

/// GET /health -- returns service, store and project list health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_healthy = state.repository.store_healthy().await;
    let snapshot = state.repository.snapshot();

    let status = if store_healthy && snapshot.status != LoadStatus::Errored {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        store_healthy,
        projects_status: snapshot.status,
        project_count: snapshot.projects.len(),
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
