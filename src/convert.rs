//! Price conversion rules
//!
//! Pure functions for currency conversion, troy-ounce/gram conversion and
//! the rounding policy applied when values are written out.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Grams in one troy ounce
pub const GRAMS_PER_TROY_OUNCE: f64 = 31.1034768;

/// Decimal places kept for currency amounts at the write boundary
pub const CURRENCY_DECIMALS: u32 = 2;

/// Conversion errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Input outside the numeric domain of the conversion
    #[error("invalid input for {operation}: {reason} (got {value})")]
    InvalidInput {
        operation: &'static str,
        reason: &'static str,
        value: f64,
    },
}

impl ConversionError {
    fn invalid(operation: &'static str, reason: &'static str, value: f64) -> Self {
        Self::InvalidInput {
            operation,
            reason,
            value,
        }
    }
}

fn check_amount(operation: &'static str, value: f64) -> Result<f64, ConversionError> {
    if !value.is_finite() {
        return Err(ConversionError::invalid(operation, "not finite", value));
    }
    if value < 0.0 {
        return Err(ConversionError::invalid(operation, "negative", value));
    }
    Ok(value)
}

/// Convert an amount into another currency: `amount * rate`
pub fn convert_currency(amount: f64, rate: f64) -> Result<f64, ConversionError> {
    let amount = check_amount("convert_currency", amount)?;
    if !rate.is_finite() {
        return Err(ConversionError::invalid("convert_currency", "rate not finite", rate));
    }
    if rate <= 0.0 {
        return Err(ConversionError::invalid(
            "convert_currency",
            "rate must be positive",
            rate,
        ));
    }
    Ok(amount * rate)
}

/// Price per gram from a price per troy ounce
pub fn per_gram(amount_per_ounce: f64) -> Result<f64, ConversionError> {
    Ok(check_amount("per_gram", amount_per_ounce)? / GRAMS_PER_TROY_OUNCE)
}

/// Price per troy ounce from a price per gram (inverse of [`per_gram`])
pub fn per_ounce(amount_per_gram: f64) -> Result<f64, ConversionError> {
    Ok(check_amount("per_ounce", amount_per_gram)? * GRAMS_PER_TROY_OUNCE)
}

/// Round a currency amount to two decimal places
///
/// Uses round-half-away-from-zero on the decimal form of the float. Only call
/// this when writing values out; chained conversions work on unrounded values.
pub fn round_currency(value: f64) -> Result<f64, ConversionError> {
    let value = check_amount("round_currency", value)?;
    let decimal = Decimal::from_f64(value)
        .ok_or_else(|| ConversionError::invalid("round_currency", "out of decimal range", value))?;

    decimal
        .round_dp_with_strategy(CURRENCY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .ok_or_else(|| ConversionError::invalid("round_currency", "out of decimal range", value))
}
