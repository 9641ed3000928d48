//! Network-backed quote source

use super::QuoteSource;
use crate::fetch::{Endpoint, FetchError, RetryingFetcher};
use async_trait::async_trait;
use std::sync::Arc;

/// Fetches a quote from an HTTP endpoint through a shared fetcher
pub struct NetworkSource {
    fetcher: Arc<RetryingFetcher>,
    endpoint: Endpoint,
}

impl NetworkSource {
    pub fn new(fetcher: Arc<RetryingFetcher>, endpoint: Endpoint) -> Self {
        Self { fetcher, endpoint }
    }
}

#[async_trait]
impl QuoteSource for NetworkSource {
    async fn quote(&self) -> Result<f64, FetchError> {
        self.fetcher.fetch(&self.endpoint).await
    }

    fn describe(&self) -> &str {
        &self.endpoint.name
    }
}
