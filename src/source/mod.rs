//! Quote sources
//!
//! Spot prices and the exchange rate come from a [`QuoteSource`]: either the
//! network ([`NetworkSource`]) or a fixed value for dry runs
//! ([`FixedValueSource`]).

mod fixed;
mod network;
mod types;

pub use fixed::FixedValueSource;
pub use network::NetworkSource;
pub use types::{Metal, Rate, SpotPrice};

use crate::fetch::FetchError;
use async_trait::async_trait;
use chrono::Utc;

/// Trait for anything that produces a single numeric quote
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Produce the current value
    async fn quote(&self) -> Result<f64, FetchError>;
    /// Short description for logs
    fn describe(&self) -> &str;
}

/// Spot price source for one metal
pub struct PriceSource {
    metal: Metal,
    inner: Box<dyn QuoteSource>,
}

impl PriceSource {
    pub fn new(metal: Metal, inner: Box<dyn QuoteSource>) -> Self {
        Self { metal, inner }
    }

    /// Metal this source prices
    pub fn metal(&self) -> Metal {
        self.metal
    }

    /// Fetch the USD per troy ounce spot price
    pub async fn spot_price(&self) -> Result<SpotPrice, FetchError> {
        let usd_per_ounce = self.inner.quote().await?;
        tracing::info!(
            metal = %self.metal,
            symbol = self.metal.symbol(),
            source = self.inner.describe(),
            usd_per_ounce,
            "Spot price"
        );

        Ok(SpotPrice {
            metal: self.metal,
            usd_per_ounce,
            fetched_at: Utc::now(),
        })
    }
}

/// USD to EGP exchange rate source
pub struct RateSource {
    inner: Box<dyn QuoteSource>,
}

impl RateSource {
    pub fn new(inner: Box<dyn QuoteSource>) -> Self {
        Self { inner }
    }

    /// Fetch the current rate
    pub async fn rate(&self) -> Result<Rate, FetchError> {
        let value = self.inner.quote().await?;
        tracing::info!(source = self.inner.describe(), rate = value, "Exchange rate");

        Ok(Rate {
            value,
            fetched_at: Utc::now(),
        })
    }
}
