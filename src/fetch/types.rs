//! Fetch layer types and errors

use thiserror::Error;

/// Raw HTTP response as seen by the fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

impl TransportResponse {
    /// Create a response with the given status and body
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 200 OK with the given body
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }
}

/// Errors raised below the HTTP status line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Request did not complete within the per-attempt timeout
    #[error("request timed out: {0}")]
    Timeout(String),
    /// Could not connect to the remote host
    #[error("connection failed: {0}")]
    Connect(String),
    /// Any other request failure (TLS, body read, redirect loop, ...)
    #[error("request failed: {0}")]
    Request(String),
    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Build(String),
}

/// The response body did not contain a usable value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Body is not valid JSON
    #[error("invalid JSON body: {0}")]
    InvalidJson(String),
    /// The field path does not exist in the body
    #[error("missing field `{path}`")]
    MissingField { path: String },
    /// The field exists but is not a number
    #[error("field `{path}` is not numeric: {found}")]
    NotNumeric { path: String, found: String },
    /// The field is numeric but outside the accepted range
    #[error("field `{path}` out of range: {value}")]
    OutOfRange { path: String, value: f64 },
    /// A status field did not carry the expected value
    #[error("field `{path}` is {found}, expected \"{expected}\"")]
    GuardMismatch {
        path: String,
        expected: String,
        found: String,
    },
}

/// Underlying cause of a failed fetch attempt
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchFailure {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl FetchFailure {
    /// Whether another attempt may succeed
    ///
    /// 4xx responses are final, except 429 (rate limited).
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchFailure::Transport(TransportError::Build(_)) => false,
            FetchFailure::Transport(_) => true,
            FetchFailure::Status { status, .. } => *status == 429 || *status >= 500,
            FetchFailure::Parse(_) => true,
        }
    }
}

/// A fetch that failed for good
#[derive(Debug, Clone, PartialEq, Error)]
#[error("fetch from {endpoint} failed after {attempts} attempt(s): {cause}")]
pub struct FetchError {
    /// Endpoint name (e.g. "gold")
    pub endpoint: String,
    /// Number of attempts made
    pub attempts: u32,
    /// Last underlying failure
    #[source]
    pub cause: FetchFailure,
}
