//! Row and log line formatting

use crate::convert::round_currency;
use crate::observation::Observation;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Display;

/// Two-decimal rendering of a currency amount
pub fn cents(value: f64) -> String {
    format!("{:.2}", round_currency(value).unwrap_or(value))
}

/// Record store fields, in [`super::RECORD_COLUMNS`] order
pub fn record_fields(obs: &Observation) -> [String; 9] {
    let (gold, silver) = (obs.gold(), obs.silver());
    [
        obs.timestamp_iso(),
        cents(gold.usd_per_ounce),
        cents(silver.usd_per_ounce),
        cents(gold.egp_per_ounce),
        cents(silver.egp_per_ounce),
        cents(gold.usd_per_gram),
        cents(silver.usd_per_gram),
        cents(gold.egp_per_gram),
        cents(silver.egp_per_gram),
    ]
}

/// Log store summary line (no trailing newline)
pub fn log_line(obs: &Observation) -> String {
    let (gold, silver) = (obs.gold(), obs.silver());
    format!(
        "[{}] Gold (oz/g): ${}/${} USD, E£{}/{} EGP | Silver (oz/g): ${}/${} USD, E£{}/{} EGP",
        obs.timestamp_iso(),
        cents(gold.usd_per_ounce),
        cents(gold.usd_per_gram),
        cents(gold.egp_per_ounce),
        cents(gold.egp_per_gram),
        cents(silver.usd_per_ounce),
        cents(silver.usd_per_gram),
        cents(silver.egp_per_ounce),
        cents(silver.egp_per_gram),
    )
}

/// Log store line for a failed run
pub fn failure_line(at: DateTime<Utc>, error: &dyn Display) -> String {
    format!(
        "[{}] Error: {}",
        at.to_rfc3339_opts(SecondsFormat::Micros, false),
        error
    )
}
