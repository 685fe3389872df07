//! On-disk storage for observation photos.
//!
//! Files live flat in one directory under generated names and are served
//! back at `/uploads/{name}`. Every path is derived from a bare file name, so
//! nothing here can touch files outside the directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use chrono::Utc;
use rookery_core::error::CoreError;
use rookery_core::image::{
    generate_stored_name, public_url, read_dimensions, stored_name_from_url,
    validate_image_upload,
};
use rookery_db::models::observation::ImageMetadata;

use crate::error::{AppError, AppResult};

/// A photo received with a create or update request, not yet written.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// File name as sent by the client.
    pub file_name: String,
    /// Declared MIME type.
    pub content_type: String,
    pub data: Bytes,
}

/// Directory-backed photo store.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Open the store, creating the directory if it does not exist yet.
    pub async fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether the upload directory is still present.
    pub async fn is_ready(&self) -> bool {
        tokio::fs::metadata(&self.dir)
            .await
            .is_ok_and(|m| m.is_dir())
    }

    /// Absolute location of a stored file.
    pub fn path_for(&self, stored_name: &str) -> PathBuf {
        self.dir.join(stored_name)
    }

    /// Gate, store and probe an upload, producing the metadata to link to
    /// the observation.
    ///
    /// Type and size are checked before anything is written. If the stored
    /// file turns out not to be a readable image it is deleted again and a
    /// validation error is returned.
    pub async fn process(&self, upload: ImageUpload) -> AppResult<ImageMetadata> {
        validate_image_upload(&upload.content_type, upload.data.len())?;

        let stored_name = generate_stored_name(&upload.file_name, &upload.content_type);
        let path = self.path_for(&stored_name);
        tokio::fs::write(&path, &upload.data)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

        match probe(path).await {
            Ok((width, height)) => {
                tracing::debug!(
                    stored_name = %stored_name,
                    size = upload.data.len(),
                    width,
                    height,
                    "Stored observation photo",
                );
                Ok(ImageMetadata {
                    url: public_url(&stored_name),
                    original_name: upload.file_name,
                    size: upload.data.len() as i64,
                    mime_type: upload.content_type,
                    width,
                    height,
                    uploaded_at: Utc::now(),
                })
            }
            Err(e) => {
                self.remove(&stored_name).await;
                Err(e)
            }
        }
    }

    /// Delete the file behind a public URL. Failures are logged, not
    /// returned; a missing file is not a failure.
    pub async fn remove_by_url(&self, url: &str) {
        match stored_name_from_url(url) {
            Some(name) => self.remove(name).await,
            None => tracing::warn!(url, "Not an upload URL, nothing removed"),
        }
    }

    /// Delete a stored file by name. Failures are logged, not returned.
    pub async fn remove(&self, stored_name: &str) {
        let path = self.path_for(stored_name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!(path = %path.display(), "Removed upload"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove upload")
            }
        }
    }
}

/// Read image dimensions off the async runtime.
async fn probe(path: PathBuf) -> AppResult<(i32, i32)> {
    let (width, height) = tokio::task::spawn_blocking(move || read_dimensions(&path))
        .await
        .map_err(|e| AppError::InternalError(format!("Image probe task failed: {e}")))??;

    let width = i32::try_from(width)
        .map_err(|_| CoreError::Validation("Image width out of range".into()))?;
    let height = i32::try_from(height)
        .map_err(|_| CoreError::Validation("Image height out of range".into()))?;
    Ok((width, height))
}
