//! Option terms and quote types

use super::ModelError;
use crate::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Parameters of a single covered call to be quoted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionTerms {
    /// Number of underlying units covered
    pub amount: Money,
    /// Current spot price per unit
    pub current_price: Money,
    /// Strike price per unit
    pub strike_price: Money,
    /// Time to expiry in seconds
    pub duration_secs: u64,
}

impl OptionTerms {
    pub fn new(amount: Money, current_price: Money, strike_price: Money, duration_secs: u64) -> Self {
        Self {
            amount,
            current_price,
            strike_price,
            duration_secs,
        }
    }

    /// Reject zero-size and zero-duration terms
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.amount.is_zero() {
            return Err(ModelError::InvalidTerms("amount must be greater than zero"));
        }
        if self.duration_secs == 0 {
            return Err(ModelError::InvalidTerms("duration must be greater than zero"));
        }
        Ok(())
    }

    /// Whether spot is above strike
    pub fn is_in_the_money(&self) -> bool {
        self.current_price > self.strike_price
    }
}

/// Where the volatility used in a quote came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum VolatilitySource {
    /// Passed in directly by the caller
    Supplied,
    /// Estimated from fetched price history
    Estimated { points: usize, returns: usize },
    /// History fetched but too short to produce a return
    Insufficient { points: usize },
    /// History could not be fetched; zero volatility used
    Unavailable { reason: String },
}

/// Premium quote with its component breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// In-the-money exercise value
    pub intrinsic_value: Money,
    /// Square-root-of-time component
    pub time_value: Money,
    /// Realized volatility component
    pub volatility_component: Money,
    /// Base-rate floor
    pub minimum_premium: Money,
    /// Sum of all components
    pub total_premium: Money,
    /// Realized volatility in percent
    pub volatility_pct: Decimal,
    /// Provenance of `volatility_pct`
    pub volatility_source: VolatilitySource,
}
