//! Boundary representation of a quote

use crate::model::{Quote, VolatilitySource};
use rust_decimal::RoundingStrategy;
use serde::Serialize;

/// A [`Quote`] with every number rendered as a fixed-precision decimal string.
///
/// Digits past the display precision are truncated; the underlying quote
/// keeps full 18-decimal precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteView {
    pub intrinsic_value: String,
    pub time_value: String,
    pub volatility_component: String,
    pub minimum_premium: String,
    pub total_premium: String,
    pub volatility_pct: String,
    pub volatility_source: VolatilitySource,
}

impl QuoteView {
    pub fn from_quote(quote: &Quote, money_decimals: u32, volatility_decimals: u32) -> Self {
        let volatility = quote
            .volatility_pct
            .round_dp_with_strategy(volatility_decimals, RoundingStrategy::ToZero);

        Self {
            intrinsic_value: quote.intrinsic_value.to_fixed_string(money_decimals),
            time_value: quote.time_value.to_fixed_string(money_decimals),
            volatility_component: quote.volatility_component.to_fixed_string(money_decimals),
            minimum_premium: quote.minimum_premium.to_fixed_string(money_decimals),
            total_premium: quote.total_premium.to_fixed_string(money_decimals),
            volatility_pct: format!("{:.*}", volatility_decimals as usize, volatility),
            volatility_source: quote.volatility_source.clone(),
        }
    }
}
