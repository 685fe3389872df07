pub mod health;
pub mod observation;
pub mod stats;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /observations                  list, create (multipart)
/// /observations/{id}             get, update (multipart), delete
///
/// /stats                         totals and a random photo
/// /location-metrics              per-location summary rows
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/observations", observation::router())
        .merge(stats::router())
}
