//! Quote orchestration

use super::{QuoteError, QuoteView};
use crate::config::{Config, QuoteConfig};
use crate::feed::{FetchError, PriceSeries, PriceSeriesProvider};
use crate::model::{OptionTerms, PremiumModel, Quote, VolatilityEstimator, VolatilitySource};
use crate::telemetry::{self, QuoteOutcome};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::time::Instant;
use tokio::sync::watch;

/// End-to-end quoting: history fetch, volatility estimate, premium.
///
/// Holds no mutable state; concurrent `get_quote` calls are independent.
#[derive(Debug, Clone, Default)]
pub struct QuoteService {
    model: PremiumModel,
    estimator: VolatilityEstimator,
    config: QuoteConfig,
}

impl QuoteService {
    /// Create a new quote service
    pub fn new(model: PremiumModel, config: QuoteConfig) -> Self {
        Self {
            model,
            estimator: VolatilityEstimator::new(),
            config,
        }
    }

    /// Create from the root Config
    pub fn from_config(config: &Config) -> Result<Self, QuoteError> {
        let model = PremiumModel::from_config(&config.model)?;
        Ok(Self::new(model, config.quote.clone()))
    }

    pub fn model(&self) -> &PremiumModel {
        &self.model
    }

    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    /// Quote the terms using recent history from `source`.
    ///
    /// A failed or empty fetch degrades to zero volatility unless
    /// `fail_on_fetch_error` is set; a cancelled fetch always fails.
    pub async fn get_quote<P>(&self, terms: &OptionTerms, source: &P) -> Result<Quote, QuoteError>
    where
        P: PriceSeriesProvider + ?Sized,
    {
        let result = self.quote(terms, source, None).await;
        Self::record_outcome(&result);
        result
    }

    /// Like [`get_quote`](Self::get_quote), abandoning the fetch once `cancel` turns true
    pub async fn get_quote_with_cancel<P>(
        &self,
        terms: &OptionTerms,
        source: &P,
        cancel: watch::Receiver<bool>,
    ) -> Result<Quote, QuoteError>
    where
        P: PriceSeriesProvider + ?Sized,
    {
        let result = self.quote(terms, source, Some(cancel)).await;
        Self::record_outcome(&result);
        result
    }

    /// Volatility over the configured window, with its provenance
    pub async fn estimate_volatility<P>(
        &self,
        source: &P,
        cancel: Option<watch::Receiver<bool>>,
    ) -> Result<(Decimal, VolatilitySource), QuoteError>
    where
        P: PriceSeriesProvider + ?Sized,
    {
        let started = Instant::now();
        let fetched = match cancel {
            Some(cancel) => fetch_cancellable(source, self.config.window_size, cancel).await,
            None => source.fetch_recent(self.config.window_size).await,
        };
        telemetry::record_fetch_latency(source.source_name(), started.elapsed());

        match fetched {
            Ok(series) => {
                let estimate = self.estimator.estimate(&series);
                let provenance = if estimate.returns == 0 {
                    VolatilitySource::Insufficient {
                        points: estimate.points,
                    }
                } else {
                    VolatilitySource::Estimated {
                        points: estimate.points,
                        returns: estimate.returns,
                    }
                };
                tracing::debug!(
                    source = source.source_name(),
                    points = estimate.points,
                    returns = estimate.returns,
                    volatility_pct = %estimate.volatility_pct,
                    "Estimated volatility"
                );
                Ok((estimate.volatility_pct, provenance))
            }
            Err(FetchError::Cancelled) => Err(QuoteError::Cancelled),
            Err(FetchError::Transport(e)) => {
                telemetry::record_fetch_failure(source.source_name());
                if self.config.fail_on_fetch_error {
                    return Err(QuoteError::Transport(e));
                }
                tracing::warn!(
                    source = source.source_name(),
                    error = %e,
                    "Price history unavailable, quoting with zero volatility"
                );
                Ok((
                    Decimal::ZERO,
                    VolatilitySource::Unavailable {
                        reason: format!("{:#}", e),
                    },
                ))
            }
        }
    }

    /// Boundary representation of a quote using the configured precision
    pub fn view(&self, quote: &Quote) -> QuoteView {
        QuoteView::from_quote(
            quote,
            self.config.display_decimals,
            self.config.volatility_decimals,
        )
    }

    async fn quote<P>(
        &self,
        terms: &OptionTerms,
        source: &P,
        cancel: Option<watch::Receiver<bool>>,
    ) -> Result<Quote, QuoteError>
    where
        P: PriceSeriesProvider + ?Sized,
    {
        // Reject before spending a round trip on history
        terms.validate()?;

        let (volatility_pct, provenance) = self.estimate_volatility(source, cancel).await?;
        let mut quote = self.model.total_premium(terms, volatility_pct)?;
        quote.volatility_source = provenance;

        telemetry::set_volatility(volatility_pct.to_f64().unwrap_or_default());
        tracing::info!(
            total_premium = %quote.total_premium,
            intrinsic = %quote.intrinsic_value,
            volatility_pct = %quote.volatility_pct,
            duration_secs = terms.duration_secs,
            "Quote computed"
        );

        Ok(quote)
    }

    fn record_outcome(result: &Result<Quote, QuoteError>) {
        let outcome = match result {
            Ok(_) => QuoteOutcome::Quoted,
            Err(QuoteError::InvalidTerms(_)) => QuoteOutcome::Rejected,
            Err(QuoteError::Cancelled) => QuoteOutcome::Cancelled,
            Err(_) => QuoteOutcome::Failed,
        };
        telemetry::record_quote(outcome);
    }
}

async fn fetch_cancellable<P>(
    source: &P,
    window_size: u64,
    mut cancel: watch::Receiver<bool>,
) -> Result<PriceSeries, FetchError>
where
    P: PriceSeriesProvider + ?Sized,
{
    tokio::select! {
        biased;
        _ = cancelled(&mut cancel) => Err(FetchError::Cancelled),
        result = source.fetch_recent(window_size) => result,
    }
}

/// Resolves once the flag is true; never if the sender goes away first
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    let closed = cancel.wait_for(|c| *c).await.is_err();
    if closed {
        std::future::pending::<()>().await;
    }
}
