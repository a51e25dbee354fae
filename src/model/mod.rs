//! Premium model module
//!
//! Prices a covered call from intrinsic value, square-root time decay,
//! realized volatility and a minimum-premium floor.

mod premium;
mod types;
mod volatility;

pub use premium::{PremiumModel, PremiumParams};
pub use types::{OptionTerms, Quote, VolatilitySource};
pub use volatility::{VolatilityEstimate, VolatilityEstimator};

use crate::money::MoneyError;
use thiserror::Error;

/// Premium model errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Terms have no economically meaningful premium
    #[error("Invalid option terms: {0}")]
    InvalidTerms(&'static str),
    /// Model parameters out of range
    #[error("Invalid model parameters: {0}")]
    InvalidParams(String),
    /// Fixed-point arithmetic failure
    #[error(transparent)]
    Math(#[from] MoneyError),
}
