//! Volatility estimation module
//!
//! Realized volatility from simple returns over a price series

use crate::feed::PriceSeries;
use crate::money::Money;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Decimal places kept on the volatility percentage
const VOLATILITY_DP: u32 = 8;

/// Result of a volatility estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolatilityEstimate {
    /// Standard deviation of simple returns, in percent (non-annualized)
    pub volatility_pct: Decimal,
    /// Points in the input series
    pub points: usize,
    /// Returns that contributed
    pub returns: usize,
}

impl VolatilityEstimate {
    fn zero(points: usize, returns: usize) -> Self {
        Self {
            volatility_pct: Decimal::ZERO,
            points,
            returns,
        }
    }
}

/// Realized volatility estimator.
///
/// Total over its input: short series, zero prices and constant prices all
/// produce zero rather than an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct VolatilityEstimator;

impl VolatilityEstimator {
    /// Create a new volatility estimator
    pub fn new() -> Self {
        Self
    }

    /// Estimate realized volatility (percent) of the series
    pub fn estimate(&self, series: &PriceSeries) -> VolatilityEstimate {
        let points = series.len();
        let returns = simple_returns(series);
        if returns.is_empty() {
            return VolatilityEstimate::zero(points, 0);
        }

        match std_dev_pct(&returns) {
            Some(volatility_pct) => VolatilityEstimate {
                volatility_pct,
                points,
                returns: returns.len(),
            },
            None => {
                tracing::warn!(
                    points,
                    returns = returns.len(),
                    "Volatility out of decimal range, using zero"
                );
                VolatilityEstimate::zero(points, returns.len())
            }
        }
    }
}

/// `(p[i] - p[i-1]) / p[i-1]` for every pair with a non-zero prior price
fn simple_returns(series: &PriceSeries) -> Vec<Decimal> {
    let prices: Vec<Money> = series.prices().collect();
    prices
        .windows(2)
        .filter_map(|pair| simple_return(pair[0], pair[1]))
        .collect()
}

fn simple_return(prev: Money, curr: Money) -> Option<Decimal> {
    if prev.is_zero() {
        return None;
    }

    let (change, negative) = if curr >= prev {
        (curr.checked_sub(prev).ok()?, false)
    } else {
        (prev.checked_sub(curr).ok()?, true)
    };

    // Ratios too large for Decimal are dropped like zero-price pairs
    let ratio = change.checked_div(prev).ok()?.to_decimal().ok()?;
    Some(if negative { -ratio } else { ratio })
}

/// Population standard deviation of returns, times 100
fn std_dev_pct(returns: &[Decimal]) -> Option<Decimal> {
    let n = Decimal::from(returns.len());

    let sum = returns
        .iter()
        .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(*r))?;
    let mean = sum.checked_div(n)?;

    let squared = returns.iter().try_fold(Decimal::ZERO, |acc, r| {
        let dev = r.checked_sub(mean)?;
        acc.checked_add(dev.checked_mul(dev)?)
    })?;
    let variance = squared.checked_div(n)?;

    let std_dev = variance.to_f64()?.sqrt();
    let pct = Decimal::try_from(std_dev * 100.0).ok()?;
    Some(pct.round_dp(VOLATILITY_DP))
}
