//! Request extractors whose rejections render as [`AppError`] JSON.

use axum::extract::{FromRequest, FromRequestParts, Multipart, Path, Request};
use axum::http::request::Parts;
use rookery_core::types::DbId;

use crate::error::AppError;
use crate::multipart::ObservationSubmission;
use crate::state::AppState;

/// Observation id taken from the `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct ObservationId(pub DbId);

impl FromRequestParts<AppState> for ObservationId {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(Self(id))
    }
}

impl FromRequest<AppState> for ObservationSubmission {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Self::from_multipart(multipart).await
    }
}
