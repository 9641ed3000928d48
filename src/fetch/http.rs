//! reqwest-backed transport

use super::{Transport, TransportError, TransportResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent header
pub const DEFAULT_USER_AGENT: &str = concat!("metal-prices/", env!("CARGO_PKG_VERSION"));

/// Configuration for the HTTP transport
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Timeout applied to each request
    pub timeout: Duration,
    /// User-Agent header sent with each request
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// HTTP transport holding one pooled client for the whole run
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with custom configuration
    pub fn with_config(config: &HttpConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        Ok(Self { client })
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else {
        TransportError::Request(err.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let response = self.client.get(url).send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;

        Ok(TransportResponse { status, body })
    }
}
