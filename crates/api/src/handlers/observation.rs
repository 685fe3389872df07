//! Handlers for the `/observations` resource.
//!
//! Create and update accept a multipart body with the form fields and an
//! optional `image` part. A request that fails after a photo was written
//! removes that photo again before the error is returned.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use rookery_core::error::CoreError;
use rookery_core::observation::{validate_create, validate_update};
use rookery_core::types::DbId;
use rookery_db::models::observation::{ImageMetadata, Observation};
use rookery_db::repositories::ObservationRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ObservationId;
use crate::multipart::ObservationSubmission;
use crate::response::SuccessResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Observation",
        id,
    })
}

/// Remove a photo written earlier in a request that is about to fail.
async fn discard(state: &AppState, image: Option<&ImageMetadata>) {
    if let Some(image) = image {
        state.uploads.remove_by_url(&image.url).await;
    }
}

/// GET /api/observations
///
/// All observations, newest first.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Observation>>> {
    let observations = ObservationRepo::list(&state.pool).await?;
    Ok(Json(observations))
}

/// GET /api/observations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ObservationId(id): ObservationId,
) -> AppResult<Json<Observation>> {
    let observation = ObservationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(observation))
}

/// POST /api/observations
///
/// Validates the form before the photo (if any) is stored, so invalid input
/// never leaves a file behind.
pub async fn create(
    State(state): State<AppState>,
    submission: ObservationSubmission,
) -> AppResult<(StatusCode, Json<Observation>)> {
    let input = validate_create(&submission.form)?;

    let image = match submission.image {
        Some(upload) => Some(state.uploads.process(upload).await?),
        None => None,
    };

    match ObservationRepo::create(&state.pool, &input, image.as_ref()).await {
        Ok(observation) => {
            tracing::info!(
                id = observation.id,
                location = %observation.location,
                has_image = image.is_some(),
                "Observation created",
            );
            Ok((StatusCode::CREATED, Json(observation)))
        }
        Err(e) => {
            discard(&state, image.as_ref()).await;
            Err(e.into())
        }
    }
}

/// PUT /api/observations/{id}
///
/// Replaces every validated field. A new photo replaces the old one, which
/// is deleted only once the record points at the new file; without a new
/// photo the existing one is kept.
pub async fn update(
    State(state): State<AppState>,
    ObservationId(id): ObservationId,
    submission: ObservationSubmission,
) -> AppResult<Json<Observation>> {
    let input = validate_update(id, &submission.form)?;

    let previous_url = ObservationRepo::find_image_url(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let image = match submission.image {
        Some(upload) => Some(state.uploads.process(upload).await?),
        None => None,
    };

    let updated = match ObservationRepo::update(&state.pool, id, &input, image.as_ref()).await {
        Ok(Some(observation)) => observation,
        Ok(None) => {
            // Deleted between the lookup and the update.
            discard(&state, image.as_ref()).await;
            return Err(not_found(id));
        }
        Err(e) => {
            discard(&state, image.as_ref()).await;
            return Err(e.into());
        }
    };

    if let (Some(new), Some(old)) = (&image, &previous_url) {
        if new.url != *old {
            state.uploads.remove_by_url(old).await;
        }
    }

    tracing::info!(id, replaced_image = image.is_some(), "Observation updated");
    Ok(Json(updated))
}

/// DELETE /api/observations/{id}
///
/// Removes the record, then its photo. A photo that cannot be deleted is
/// logged and does not fail the request.
pub async fn delete(
    State(state): State<AppState>,
    ObservationId(id): ObservationId,
) -> AppResult<Json<SuccessResponse>> {
    let image_url = ObservationRepo::find_image_url(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if !ObservationRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    if let Some(url) = image_url {
        state.uploads.remove_by_url(&url).await;
    }

    tracing::info!(id, "Observation deleted");
    Ok(Json(SuccessResponse::ok()))
}
