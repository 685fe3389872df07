//! Aggregate read models for the dashboard endpoints.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Totals across every observation, plus one representative photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationTotals {
    pub total_adults: i64,
    pub total_chicks: i64,
    pub location_count: i64,
    /// URL of a randomly chosen attached photo, if any exist.
    pub random_image: Option<String>,
}

/// Per-location summary row.
///
/// `growth_rate` is the mean total population per observation at the
/// location, not a change over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LocationMetric {
    pub location: String,
    pub total_adults: i64,
    pub total_chicks: i64,
    pub total_population: i64,
    pub observation_count: i64,
    pub latest_observation: Timestamp,
    pub growth_rate: f64,
}
