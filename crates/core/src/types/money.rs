//! Monetary amounts.
//!
//! Backends send amounts as decimal strings (Shopify's `Decimal` scalar).
//! The canonical model carries them as plain numbers paired with the
//! currency code the backend reported.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A monetary value with its ISO 4217 currency code.
///
/// `value` is `NaN` when the backend amount could not be parsed; use
/// [`Money::is_missing`] rather than comparing against zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub value: f64,
    /// ISO 4217 currency code, exactly as reported by the backend.
    pub currency_code: String,
}

impl Money {
    /// Create a new money value.
    #[must_use]
    pub fn new(value: f64, currency_code: impl Into<String>) -> Self {
        Self {
            value,
            currency_code: currency_code.into(),
        }
    }

    /// Whether the amount failed to parse.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        self.value.is_nan()
    }

    /// The amount as a decimal rounded to two places, `None` when missing.
    #[must_use]
    pub fn to_decimal(&self) -> Option<Decimal> {
        Decimal::from_f64_retain(self.value).map(|d| d.round_dp(2))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_decimal() {
            Some(amount) => write!(f, "{amount:.2} {}", self.currency_code),
            None => write!(f, "- {}", self.currency_code),
        }
    }
}

/// Parse a backend decimal string into a number.
///
/// Returns `NaN` when the string is not a plain decimal number. Parsing goes
/// through [`Decimal`] so two-decimal inputs land on the nearest `f64`
/// without accumulated drift.
#[must_use]
pub fn parse_amount(amount: &str) -> f64 {
    Decimal::from_str(amount.trim())
        .ok()
        .and_then(|d| d.to_f64())
        .unwrap_or(f64::NAN)
}

/// Pair a backend amount with its currency code.
///
/// Never infers a currency and never fails: an unparseable amount yields a
/// `NaN` value and the caller decides how to treat it.
#[must_use]
pub fn normalize_money(amount: &str, currency_code: &str) -> Money {
    Money::new(parse_amount(amount), currency_code)
}
