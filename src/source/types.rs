//! Quote types

use chrono::{DateTime, Utc};
use std::fmt;

/// A tracked precious metal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metal {
    Gold,
    Silver,
}

impl Metal {
    /// All tracked metals, in record column order
    pub const ALL: [Metal; 2] = [Metal::Gold, Metal::Silver];

    /// ISO 4217 commodity code
    pub fn symbol(&self) -> &'static str {
        match self {
            Metal::Gold => "XAU",
            Metal::Silver => "XAG",
        }
    }

    /// Lowercase name used in column headers
    pub fn key(&self) -> &'static str {
        match self {
            Metal::Gold => "gold",
            Metal::Silver => "silver",
        }
    }
}

impl fmt::Display for Metal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metal::Gold => write!(f, "Gold"),
            Metal::Silver => write!(f, "Silver"),
        }
    }
}

/// Spot price of a metal in USD per troy ounce
#[derive(Debug, Clone, PartialEq)]
pub struct SpotPrice {
    pub metal: Metal,
    pub usd_per_ounce: f64,
    pub fetched_at: DateTime<Utc>,
}

/// USD to EGP exchange rate
#[derive(Debug, Clone, PartialEq)]
pub struct Rate {
    /// EGP per USD
    pub value: f64,
    pub fetched_at: DateTime<Utc>,
}
