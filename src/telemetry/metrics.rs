//! Fetch metrics via the `metrics` facade
//!
//! Calls are no-ops until a recorder is installed by the embedding
//! application.

use std::time::Duration;

/// Attempt counter name
pub const FETCH_ATTEMPTS: &str = "metal_prices_fetch_attempts_total";
/// Attempt latency histogram name
pub const FETCH_LATENCY: &str = "metal_prices_fetch_latency_ms";

/// Outcome of a single fetch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Value extracted
    Success,
    /// Failed, another attempt follows
    Retry,
    /// Failed, no attempt follows
    Exhausted,
}

impl AttemptOutcome {
    /// Label value for the outcome
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptOutcome::Success => "success",
            AttemptOutcome::Retry => "retry",
            AttemptOutcome::Exhausted => "exhausted",
        }
    }
}

/// Count one fetch attempt
pub fn record_fetch_attempt(endpoint: &str, outcome: AttemptOutcome) {
    metrics::counter!(
        FETCH_ATTEMPTS,
        "endpoint" => endpoint.to_string(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

/// Record how long a fetch attempt took
pub fn record_fetch_latency(endpoint: &str, duration: Duration) {
    metrics::histogram!(FETCH_LATENCY, "endpoint" => endpoint.to_string())
        .record(duration.as_secs_f64() * 1000.0);

    tracing::trace!(
        metric = FETCH_LATENCY,
        endpoint,
        value_ms = duration.as_millis() as u64,
        "Recording latency"
    );
}
