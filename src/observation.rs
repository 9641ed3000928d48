//! Converted price observation
//!
//! One [`Observation`] is produced per pipeline run and never changes after
//! construction. Values are kept unrounded; rounding happens when they are
//! written out.

use crate::convert::{convert_currency, per_gram, ConversionError};
use crate::source::{Metal, Rate, SpotPrice};
use chrono::{DateTime, SecondsFormat, Utc};

/// One metal's price in both currencies and both mass units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetalQuote {
    pub usd_per_ounce: f64,
    pub egp_per_ounce: f64,
    pub usd_per_gram: f64,
    pub egp_per_gram: f64,
}

impl MetalQuote {
    /// Convert a USD per ounce spot price with a USD to EGP rate
    pub fn convert(usd_per_ounce: f64, rate: f64) -> Result<Self, ConversionError> {
        let egp_per_ounce = convert_currency(usd_per_ounce, rate)?;
        let usd_per_gram = per_gram(usd_per_ounce)?;
        let egp_per_gram = convert_currency(usd_per_gram, rate)?;

        Ok(Self {
            usd_per_ounce,
            egp_per_ounce,
            usd_per_gram,
            egp_per_gram,
        })
    }
}

/// A timestamped, fully converted gold and silver observation
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    timestamp: DateTime<Utc>,
    gold: MetalQuote,
    silver: MetalQuote,
}

impl Observation {
    /// Build an observation from fetched quotes
    pub fn from_quotes(
        timestamp: DateTime<Utc>,
        gold: &SpotPrice,
        silver: &SpotPrice,
        rate: &Rate,
    ) -> Result<Self, ConversionError> {
        debug_assert_eq!(gold.metal, Metal::Gold);
        debug_assert_eq!(silver.metal, Metal::Silver);

        Ok(Self {
            timestamp,
            gold: MetalQuote::convert(gold.usd_per_ounce, rate.value)?,
            silver: MetalQuote::convert(silver.usd_per_ounce, rate.value)?,
        })
    }

    /// Observation time (UTC)
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// ISO-8601 timestamp with microseconds, e.g. `2025-09-30T12:00:00.123456+00:00`
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, false)
    }

    pub fn gold(&self) -> &MetalQuote {
        &self.gold
    }

    pub fn silver(&self) -> &MetalQuote {
        &self.silver
    }

    /// Quote for a given metal
    pub fn quote(&self, metal: Metal) -> &MetalQuote {
        match metal {
            Metal::Gold => &self.gold,
            Metal::Silver => &self.silver,
        }
    }
}
