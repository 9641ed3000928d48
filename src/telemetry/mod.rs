//! Telemetry module
//!
//! Structured logging and fetch metrics

mod logging;
mod metrics;

pub use logging::{init_logging, LogFormat};
pub use metrics::{
    record_fetch_attempt, record_fetch_latency, AttemptOutcome, FETCH_ATTEMPTS, FETCH_LATENCY,
};

use crate::config::TelemetryConfig;

/// Returned once telemetry is installed; holds no resources
pub struct TelemetryGuard {
    _priv: (),
}

/// Initialize all telemetry subsystems
///
/// Metrics are emitted through the `metrics` facade; without an installed
/// recorder they are no-ops.
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    init_logging(&config.log_level, config.format)?;

    Ok(TelemetryGuard { _priv: () })
}
