//! Backoff parameters for read requests.

use std::time::Duration;

/// Tunable parameters for the read retry strategy.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Extra attempts after the first one.
    pub retries: u32,
    /// Delay before the first retry; doubles after every failure.
    pub initial_delay: Duration,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
    /// Per-attempt request timeout.
    pub timeout: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Delay to wait after failed attempt number `attempt` (zero-based).
///
/// The result is clamped to [`RetryConfig::max_delay`].
pub fn backoff_delay(attempt: u32, config: &RetryConfig) -> Duration {
    config
        .initial_delay
        .saturating_mul(2u32.saturating_pow(attempt))
        .min(config.max_delay)
}
