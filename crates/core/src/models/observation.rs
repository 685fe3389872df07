//! Observation entity model and image metadata DTO.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// A row from the `observations` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Observation {
    pub id: DbId,
    pub location: String,
    pub species: String,
    pub adult_count: i32,
    pub chick_count: i32,
    pub notes: String,
    pub image_url: Option<String>,
    pub image_original_name: Option<String>,
    pub image_size: Option<i64>,
    pub image_mime_type: Option<String>,
    pub image_width: Option<i32>,
    pub image_height: Option<i32>,
    pub image_uploaded_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Metadata for an attached photo. Written to the image columns as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub url: String,
    pub original_name: String,
    pub size: i64,
    pub mime_type: String,
    pub width: i32,
    pub height: i32,
    pub uploaded_at: Timestamp,
}
