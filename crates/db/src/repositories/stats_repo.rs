//! Aggregate queries over the `observations` table.

use sqlx::PgPool;

use crate::models::stats::{LocationMetric, ObservationTotals};

/// Provides summary statistics for the dashboard.
pub struct StatsRepo;

impl StatsRepo {
    /// Sum adults and chicks, count distinct locations and pick one random
    /// photo. Every figure is `0` on an empty table.
    pub async fn totals(pool: &PgPool) -> Result<ObservationTotals, sqlx::Error> {
        let (total_adults, total_chicks, location_count) = sqlx::query_as::<_, (i64, i64, i64)>(
            "SELECT
                COALESCE(SUM(adult_count), 0)::BIGINT,
                COALESCE(SUM(chick_count), 0)::BIGINT,
                COUNT(DISTINCT location)
             FROM observations",
        )
        .fetch_one(pool)
        .await?;

        let random_image = sqlx::query_scalar::<_, String>(
            "SELECT image_url FROM observations
             WHERE image_url IS NOT NULL
             ORDER BY random()
             LIMIT 1",
        )
        .fetch_optional(pool)
        .await?;

        Ok(ObservationTotals {
            total_adults,
            total_chicks,
            location_count,
            random_image,
        })
    }

    /// One summary row per location, largest total population first.
    pub async fn location_metrics(pool: &PgPool) -> Result<Vec<LocationMetric>, sqlx::Error> {
        sqlx::query_as::<_, LocationMetric>(
            "SELECT
                location,
                SUM(adult_count)::BIGINT AS total_adults,
                SUM(chick_count)::BIGINT AS total_chicks,
                SUM(adult_count::BIGINT + chick_count)::BIGINT AS total_population,
                COUNT(*) AS observation_count,
                MAX(created_at) AS latest_observation,
                SUM(adult_count::BIGINT + chick_count)::DOUBLE PRECISION / COUNT(*) AS growth_rate
             FROM observations
             GROUP BY location
             ORDER BY total_population DESC, location ASC",
        )
        .fetch_all(pool)
        .await
    }
}
