use std::sync::Arc;

use crate::uploads::UploadStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: rookery_db::DbPool,
    /// On-disk storage for observation photos.
    pub uploads: Arc<UploadStore>,
}
