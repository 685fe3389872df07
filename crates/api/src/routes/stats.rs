//! Route definitions for the dashboard aggregates.

use axum::routing::get;
use axum::Router;

use crate::handlers::stats;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats::totals))
        .route("/location-metrics", get(stats::location_metrics))
}
