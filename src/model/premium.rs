//! Covered-call premium model
//!
//! total = intrinsic + time value + volatility component + minimum premium
//!
//! Every component is non-negative, so the total never falls below the
//! minimum premium. The only irrational step, `sqrt(duration / year)`, is
//! quantized to whole basis points before it touches money.

use super::{ModelError, OptionTerms, Quote, VolatilitySource};
use crate::config::ModelConfig;
use crate::money::{Money, MoneyError, BPS_DENOMINATOR};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Seconds in a 365-day year
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Tunable constants of the premium model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PremiumParams {
    /// Minimum premium rate in basis points of notional
    pub base_rate_bps: u32,
    /// Fraction of the volatility percentage charged
    pub volatility_scaling: Decimal,
    /// Multiplier on sqrt(year fraction)
    pub time_decay_factor: Decimal,
    /// Length of a year used for the time fraction
    pub seconds_per_year: u64,
}

impl Default for PremiumParams {
    fn default() -> Self {
        Self {
            base_rate_bps: 10, // 0.10%
            volatility_scaling: dec!(0.5),
            time_decay_factor: dec!(0.7),
            seconds_per_year: SECONDS_PER_YEAR,
        }
    }
}

impl PremiumParams {
    /// Check parameters are usable
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.volatility_scaling.is_sign_negative() {
            return Err(ModelError::InvalidParams(format!(
                "volatility_scaling must be non-negative, got {}",
                self.volatility_scaling
            )));
        }
        if self.time_decay_factor.is_sign_negative() {
            return Err(ModelError::InvalidParams(format!(
                "time_decay_factor must be non-negative, got {}",
                self.time_decay_factor
            )));
        }
        if self.seconds_per_year == 0 {
            return Err(ModelError::InvalidParams(
                "seconds_per_year must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<&ModelConfig> for PremiumParams {
    fn from(config: &ModelConfig) -> Self {
        Self {
            base_rate_bps: config.base_rate_bps,
            volatility_scaling: config.volatility_scaling,
            time_decay_factor: config.time_decay_factor,
            seconds_per_year: config.seconds_per_year,
        }
    }
}

/// Premium model over fixed-point money
#[derive(Debug, Clone, Default)]
pub struct PremiumModel {
    params: PremiumParams,
}

impl PremiumModel {
    /// Create a model, rejecting invalid parameters
    pub fn new(params: PremiumParams) -> Result<Self, ModelError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Create from ModelConfig
    pub fn from_config(config: &ModelConfig) -> Result<Self, ModelError> {
        Self::new(PremiumParams::from(config))
    }

    pub fn params(&self) -> &PremiumParams {
        &self.params
    }

    /// `max(0, current - strike) * amount`
    pub fn intrinsic_value(
        &self,
        amount: Money,
        current_price: Money,
        strike_price: Money,
    ) -> Result<Money, ModelError> {
        if current_price <= strike_price {
            return Ok(Money::ZERO);
        }
        let spread = current_price.checked_sub(strike_price)?;
        Ok(spread.checked_mul(amount)?)
    }

    /// `floor(sqrt(duration / year) * time_decay_factor * 10_000)`
    pub fn time_decay_bps(&self, duration_secs: u64) -> u128 {
        let year_fraction = duration_secs as f64 / self.params.seconds_per_year as f64;
        let factor = self.params.time_decay_factor.to_f64().unwrap_or_default();
        let bps = (year_fraction.sqrt() * factor * BPS_DENOMINATOR as f64).floor();
        // Float-to-int `as` saturates; NaN maps to 0
        bps as u128
    }

    /// `current * amount * time_decay_bps / 10_000`, truncated once
    pub fn time_value(
        &self,
        amount: Money,
        current_price: Money,
        duration_secs: u64,
    ) -> Result<Money, ModelError> {
        let bps = self.time_decay_bps(duration_secs);
        Ok(current_price.checked_mul_bps(amount, bps)?)
    }

    /// `floor(volatility_pct * volatility_scaling * 100)`
    pub fn volatility_bps(&self, volatility_pct: Decimal) -> Result<u128, ModelError> {
        if volatility_pct.is_sign_negative() {
            return Ok(0);
        }
        volatility_pct
            .checked_mul(self.params.volatility_scaling)
            .and_then(|v| v.checked_mul(Decimal::ONE_HUNDRED))
            .and_then(|v| v.floor().to_u128())
            .ok_or(ModelError::Math(MoneyError::Overflow))
    }

    /// `current * volatility_bps / 10_000 * amount`
    pub fn volatility_component(
        &self,
        amount: Money,
        current_price: Money,
        volatility_pct: Decimal,
    ) -> Result<Money, ModelError> {
        let bps = self.volatility_bps(volatility_pct)?;
        Ok(current_price.mul_bps(bps)?.checked_mul(amount)?)
    }

    /// `amount * current * base_rate_bps / 10_000`
    pub fn minimum_premium(&self, amount: Money, current_price: Money) -> Result<Money, ModelError> {
        let bps = u128::from(self.params.base_rate_bps);
        Ok(amount.checked_mul_bps(current_price, bps)?)
    }

    /// Price the terms at the given volatility
    pub fn total_premium(
        &self,
        terms: &OptionTerms,
        volatility_pct: Decimal,
    ) -> Result<Quote, ModelError> {
        terms.validate()?;

        let intrinsic_value =
            self.intrinsic_value(terms.amount, terms.current_price, terms.strike_price)?;
        let time_value = self.time_value(terms.amount, terms.current_price, terms.duration_secs)?;
        let volatility_component =
            self.volatility_component(terms.amount, terms.current_price, volatility_pct)?;
        let minimum_premium = self.minimum_premium(terms.amount, terms.current_price)?;

        let total_premium = Money::checked_sum([
            intrinsic_value,
            time_value,
            volatility_component,
            minimum_premium,
        ])?;

        tracing::debug!(
            intrinsic = %intrinsic_value,
            time = %time_value,
            volatility = %volatility_component,
            minimum = %minimum_premium,
            total = %total_premium,
            "Computed premium"
        );

        Ok(Quote {
            intrinsic_value,
            time_value,
            volatility_component,
            minimum_premium,
            total_premium,
            volatility_pct,
            volatility_source: VolatilitySource::Supplied,
        })
    }
}
