//! Rules for photos attached to observations.
//!
//! Provides the accepted-type and size gate, generated storage names, the
//! public URL scheme for stored files, and header-only dimension probing.

use std::path::Path;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Largest accepted upload (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// MIME types accepted for observation photos.
pub const ACCEPTED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// URL prefix under which stored uploads are served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads/";

// ---------------------------------------------------------------------------
// Upload gate
// ---------------------------------------------------------------------------

/// Check the declared content type and size of an upload before anything is
/// written to disk.
pub fn validate_image_upload(content_type: &str, size: usize) -> Result<(), CoreError> {
    if !ACCEPTED_IMAGE_TYPES.contains(&content_type) {
        return Err(CoreError::Validation(format!(
            "Invalid file type '{content_type}'. Accepted: {}",
            ACCEPTED_IMAGE_TYPES.join(", ")
        )));
    }
    if size == 0 {
        return Err(CoreError::Validation("Image file is empty".into()));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(CoreError::Validation(format!(
            "Image is {size} bytes; the limit is {MAX_IMAGE_BYTES} bytes"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

/// File extension for a stored upload.
///
/// Keeps the original extension when it is a recognised image extension,
/// otherwise derives one from the content type.
pub fn extension_for(original_name: &str, content_type: &str) -> &'static str {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("jpg") => "jpg",
        Some("jpeg") => "jpeg",
        Some("png") => "png",
        _ => match content_type {
            "image/png" => "png",
            _ => "jpg",
        },
    }
}

/// Generate a unique storage name: `{unix_millis}-{uuid}.{ext}`.
pub fn generate_stored_name(original_name: &str, content_type: &str) -> String {
    format!(
        "{}-{}.{}",
        chrono::Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4().simple(),
        extension_for(original_name, content_type)
    )
}

/// Public URL for a stored upload.
pub fn public_url(stored_name: &str) -> String {
    format!("{UPLOADS_URL_PREFIX}{stored_name}")
}

/// Recover the stored file name from a public URL.
///
/// Only the final path component is returned, so a crafted URL can never
/// point outside the upload directory.
pub fn stored_name_from_url(url: &str) -> Option<&str> {
    Path::new(url)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty() && *n != "..")
}

// ---------------------------------------------------------------------------
// Probing
// ---------------------------------------------------------------------------

/// Read the pixel dimensions of an image file from its header.
///
/// Fails with [`CoreError::Validation`] when the file is not a decodable
/// image, regardless of its declared type.
pub fn read_dimensions(path: &Path) -> Result<(u32, u32), CoreError> {
    let reader = ::image::ImageReader::open(path)
        .map_err(|e| CoreError::Internal(format!("Failed to open {}: {e}", path.display())))?
        .with_guessed_format()
        .map_err(|e| CoreError::Internal(format!("Failed to read {}: {e}", path.display())))?;

    reader
        .into_dimensions()
        .map_err(|e| CoreError::Validation(format!("Invalid image file: {e}")))
}
