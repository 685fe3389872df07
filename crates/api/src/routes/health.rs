//! Liveness probe for the service and its two stores.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthReport {
    /// `ok` when every store is usable, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Whether the photo directory exists and is a directory.
    pub uploads_ready: bool,
}

/// GET /health
///
/// Always answers 200; callers read `status` to tell a degraded instance
/// from a healthy one.
async fn report(State(state): State<AppState>) -> Json<HealthReport> {
    let db_healthy = rookery_db::health_check(&state.pool).await.is_ok();
    let uploads_ready = state.uploads.is_ready().await;

    if !db_healthy || !uploads_ready {
        tracing::warn!(db_healthy, uploads_ready, "Health check degraded");
    }

    Json(HealthReport {
        status: if db_healthy && uploads_ready { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        uploads_ready,
    })
}

/// Mounted at the root, outside `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(report))
}
