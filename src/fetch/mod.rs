//! Network fetch layer
//!
//! A [`Transport`] performs raw GETs; [`RetryingFetcher`] turns them into a
//! single numeric value with bounded retry.

mod extract;
mod http;
mod retry;
mod types;

pub use extract::{extract_number, FieldGuard};
pub use http::{HttpConfig, HttpTransport, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use retry::{
    Endpoint, RetryPolicy, RetryingFetcher, ValueDomain, DEFAULT_RETRY_DELAY, MAX_ATTEMPTS,
};
pub use types::{FetchError, FetchFailure, ParseError, TransportError, TransportResponse};

#[cfg(test)]
pub(crate) use retry::tests::ScriptedTransport;

use async_trait::async_trait;

/// Trait for HTTP GET implementations
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET a URL and return status and body
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError>;
}
