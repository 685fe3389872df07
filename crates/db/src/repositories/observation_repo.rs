//! Repository for the `observations` table.

use rookery_core::observation::ObservationPayload;
use rookery_core::types::DbId;
use sqlx::PgPool;

use crate::models::observation::{ImageMetadata, Observation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, location, species, adult_count, chick_count, notes, \
    image_url, image_original_name, image_size, image_mime_type, \
    image_width, image_height, image_uploaded_at, created_at";

/// Provides CRUD operations for observations.
pub struct ObservationRepo;

impl ObservationRepo {
    /// Insert a new observation, returning the created row.
    ///
    /// When `image` is `None` every image column is left NULL.
    pub async fn create(
        pool: &PgPool,
        input: &ObservationPayload,
        image: Option<&ImageMetadata>,
    ) -> Result<Observation, sqlx::Error> {
        let query = format!(
            "INSERT INTO observations
                (location, species, adult_count, chick_count, notes,
                 image_url, image_original_name, image_size, image_mime_type,
                 image_width, image_height, image_uploaded_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Observation>(&query)
            .bind(input.location.as_str())
            .bind(&input.species)
            .bind(input.adult_count)
            .bind(input.chick_count)
            .bind(&input.notes)
            .bind(image.map(|m| m.url.as_str()))
            .bind(image.map(|m| m.original_name.as_str()))
            .bind(image.map(|m| m.size))
            .bind(image.map(|m| m.mime_type.as_str()))
            .bind(image.map(|m| m.width))
            .bind(image.map(|m| m.height))
            .bind(image.map(|m| m.uploaded_at))
            .fetch_one(pool)
            .await
    }

    /// List every observation, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Observation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM observations
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Observation>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find an observation by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Observation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM observations WHERE id = $1");
        sqlx::query_as::<_, Observation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Look up the attached photo URL of an observation.
    ///
    /// The outer `Option` is `None` when no row exists; the inner one is
    /// `None` when the row has no photo.
    pub async fn find_image_url(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Option<String>>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<String>>("SELECT image_url FROM observations WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the mutable fields of an observation.
    ///
    /// With `image` present all image columns are overwritten together;
    /// without it they are left as they were. Returns `None` if no row with
    /// the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ObservationPayload,
        image: Option<&ImageMetadata>,
    ) -> Result<Option<Observation>, sqlx::Error> {
        let Some(image) = image else {
            let query = format!(
                "UPDATE observations SET
                    location = $2,
                    species = $3,
                    adult_count = $4,
                    chick_count = $5,
                    notes = $6
                 WHERE id = $1
                 RETURNING {COLUMNS}"
            );
            return sqlx::query_as::<_, Observation>(&query)
                .bind(id)
                .bind(input.location.as_str())
                .bind(&input.species)
                .bind(input.adult_count)
                .bind(input.chick_count)
                .bind(&input.notes)
                .fetch_optional(pool)
                .await;
        };

        let query = format!(
            "UPDATE observations SET
                location = $2,
                species = $3,
                adult_count = $4,
                chick_count = $5,
                notes = $6,
                image_url = $7,
                image_original_name = $8,
                image_size = $9,
                image_mime_type = $10,
                image_width = $11,
                image_height = $12,
                image_uploaded_at = $13
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Observation>(&query)
            .bind(id)
            .bind(input.location.as_str())
            .bind(&input.species)
            .bind(input.adult_count)
            .bind(input.chick_count)
            .bind(&input.notes)
            .bind(&image.url)
            .bind(&image.original_name)
            .bind(image.size)
            .bind(&image.mime_type)
            .bind(image.width)
            .bind(image.height)
            .bind(image.uploaded_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete an observation by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM observations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
