//! Decoding of multipart observation submissions into typed DTOs.
//!
//! Decoding only maps wire fields onto [`ObservationForm`] and an optional
//! [`ImageUpload`]; all validation happens afterwards, independent of the
//! encoding.

use axum::extract::Multipart;
use rookery_core::observation::ObservationForm;

use crate::error::{AppError, AppResult};
use crate::uploads::ImageUpload;

/// Name of the multipart part carrying the photo.
const IMAGE_FIELD: &str = "image";

/// A decoded create/update request body.
#[derive(Debug, Default)]
pub struct ObservationSubmission {
    pub form: ObservationForm,
    pub image: Option<ImageUpload>,
}

impl ObservationSubmission {
    /// Read every part of the body. Unknown fields are ignored; at most one
    /// photo is accepted.
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut submission = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();

            if name == IMAGE_FIELD {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;

                // An untouched browser file input submits an empty, unnamed part.
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }
                if submission.image.is_some() {
                    return Err(AppError::BadRequest(
                        "Only one image may be attached to an observation".into(),
                    ));
                }
                submission.image = Some(ImageUpload {
                    file_name,
                    content_type,
                    data,
                });
                continue;
            }

            let slot = match name.as_str() {
                "location" => &mut submission.form.location,
                "species" => &mut submission.form.species,
                "adult_count" => &mut submission.form.adult_count,
                "chick_count" => &mut submission.form.chick_count,
                "notes" => &mut submission.form.notes,
                _ => continue,
            };
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            *slot = Some(text);
        }

        Ok(submission)
    }
}
