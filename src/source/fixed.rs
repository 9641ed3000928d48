//! Fixed-value quote source for dry runs and tests

use super::QuoteSource;
use crate::fetch::FetchError;
use async_trait::async_trait;

/// Returns the same value every time; performs no I/O
#[derive(Debug, Clone)]
pub struct FixedValueSource {
    name: String,
    value: f64,
}

impl FixedValueSource {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[async_trait]
impl QuoteSource for FixedValueSource {
    async fn quote(&self) -> Result<f64, FetchError> {
        Ok(self.value)
    }

    fn describe(&self) -> &str {
        &self.name
    }
}
