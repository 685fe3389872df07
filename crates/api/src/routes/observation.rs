//! Route definitions for the `/observations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::observation;
use crate::state::AppState;

/// Routes mounted at `/observations`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(observation::list).post(observation::create))
        .route(
            "/{id}",
            get(observation::get_by_id)
                .put(observation::update)
                .delete(observation::delete),
        )
}
