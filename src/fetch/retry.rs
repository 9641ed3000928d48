//! Bounded-retry fetch of a single numeric field

use super::extract::{extract_number, FieldGuard};
use super::{FetchError, FetchFailure, ParseError, Transport};
use crate::telemetry::{record_fetch_attempt, record_fetch_latency, AttemptOutcome};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Attempts per fetch, first try included
pub const MAX_ATTEMPTS: u32 = 3;

/// Default base delay between attempts
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Accepted range of a fetched value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueDomain {
    /// Finite and >= 0 (prices)
    #[default]
    NonNegative,
    /// Finite and > 0 (exchange rates)
    Positive,
}

impl ValueDomain {
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite()
            && match self {
                ValueDomain::NonNegative => value >= 0.0,
                ValueDomain::Positive => value > 0.0,
            }
    }
}

/// A remote numeric value: where to get it and where it sits in the body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Short name used in logs and errors (e.g. "gold")
    pub name: String,
    /// URL to GET
    pub url: String,
    /// Dotted path to the numeric field
    pub field_path: String,
    /// Optional status check performed before extraction
    pub guard: Option<FieldGuard>,
    /// Values outside this domain count as malformed responses
    pub domain: ValueDomain,
}

impl Endpoint {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        field_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            field_path: field_path.into(),
            guard: None,
            domain: ValueDomain::default(),
        }
    }

    /// Require `path == expected` in the body before extracting the value
    pub fn with_guard(mut self, path: impl Into<String>, expected: impl Into<String>) -> Self {
        self.guard = Some(FieldGuard::new(path, expected));
        self
    }

    /// Set the accepted value domain
    pub fn with_domain(mut self, domain: ValueDomain) -> Self {
        self.domain = domain;
        self
    }
}

/// Retry pacing. The attempt ceiling is fixed at [`MAX_ATTEMPTS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Base delay; attempt `n` is followed by a wait of `n * retry_delay`
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(retry_delay: Duration) -> Self {
        Self { retry_delay }
    }

    /// Wait after a failed `attempt` (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.retry_delay * attempt
    }
}

/// GETs an endpoint and extracts one number, retrying transient failures
pub struct RetryingFetcher {
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
}

impl RetryingFetcher {
    /// Create a fetcher over a shared transport
    pub fn new(transport: Arc<dyn Transport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Fetch the endpoint's numeric field
    ///
    /// Makes at most [`MAX_ATTEMPTS`] attempts. Transport errors, 5xx, 429 and
    /// unparseable bodies are retried; other 4xx fail at once. The returned
    /// error carries the last cause.
    pub async fn fetch(&self, endpoint: &Endpoint) -> Result<f64, FetchError> {
        let mut attempt = 0;

        loop {
            attempt += 1;
            let started = Instant::now();
            let result = self.attempt_once(endpoint).await;
            record_fetch_latency(&endpoint.name, started.elapsed());

            let cause = match result {
                Ok(value) => {
                    record_fetch_attempt(&endpoint.name, AttemptOutcome::Success);
                    tracing::debug!(
                        endpoint = %endpoint.name,
                        attempt,
                        value,
                        "Fetched value"
                    );
                    return Ok(value);
                }
                Err(cause) => cause,
            };

            if !cause.is_retryable() || attempt >= MAX_ATTEMPTS {
                record_fetch_attempt(&endpoint.name, AttemptOutcome::Exhausted);
                tracing::error!(
                    endpoint = %endpoint.name,
                    attempt,
                    error = %cause,
                    "Fetch failed"
                );
                return Err(FetchError {
                    endpoint: endpoint.name.clone(),
                    attempts: attempt,
                    cause,
                });
            }

            record_fetch_attempt(&endpoint.name, AttemptOutcome::Retry);
            let delay = self.policy.delay_after(attempt);
            tracing::warn!(
                endpoint = %endpoint.name,
                attempt,
                max_attempts = MAX_ATTEMPTS,
                delay_ms = delay.as_millis() as u64,
                error = %cause,
                "Fetch attempt failed, retrying"
            );
            sleep(delay).await;
        }
    }

    async fn attempt_once(&self, endpoint: &Endpoint) -> Result<f64, FetchFailure> {
        let response = self.transport.get(&endpoint.url).await?;

        if !(200..300).contains(&response.status) {
            return Err(FetchFailure::Status {
                status: response.status,
                body: response.body.chars().take(200).collect(),
            });
        }

        let value = extract_number(
            &response.body,
            &endpoint.field_path,
            endpoint.guard.as_ref(),
        )?;

        if !endpoint.domain.contains(value) {
            return Err(ParseError::OutOfRange {
                path: endpoint.field_path.clone(),
                value,
            }
            .into());
        }
        Ok(value)
    }
}
