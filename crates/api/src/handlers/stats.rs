//! Handlers for the dashboard aggregates.

use axum::extract::State;
use axum::Json;
use rookery_db::models::stats::{LocationMetric, ObservationTotals};
use rookery_db::repositories::StatsRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/stats
pub async fn totals(State(state): State<AppState>) -> AppResult<Json<ObservationTotals>> {
    let totals = StatsRepo::totals(&state.pool).await?;
    Ok(Json(totals))
}

/// GET /api/location-metrics
///
/// One row per location, largest total population first.
pub async fn location_metrics(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<LocationMetric>>> {
    let metrics = StatsRepo::location_metrics(&state.pool).await?;
    Ok(Json(metrics))
}
