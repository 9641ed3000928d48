//! metal-prices: gold and silver spot price tracker
//!
//! This library provides the core components for:
//! - Fetching spot prices and the USD to EGP rate with bounded retry
//! - Converting per-ounce USD prices to EGP and per-gram values
//! - Appending observations to a semicolon-delimited record store and a log
//! - A single-shot pipeline tying the steps together, with a mock mode

pub mod cli;
pub mod config;
pub mod convert;
pub mod fetch;
pub mod observation;
pub mod pipeline;
pub mod record;
pub mod source;
pub mod telemetry;
