//! In-memory price source

use super::{FetchError, PriceSeries, PriceSeriesProvider};
use async_trait::async_trait;

/// Serves a fixed series; `fetch_recent(n)` returns sequences `[latest - n, latest]`
#[derive(Debug, Clone, Default)]
pub struct StaticPriceSource {
    series: PriceSeries,
}

impl StaticPriceSource {
    pub fn new(series: PriceSeries) -> Self {
        Self { series }
    }

    /// Series whose sequences run 1, 2, 3, ... in the given order
    pub fn from_prices(prices: impl IntoIterator<Item = crate::money::Money>) -> Self {
        let series = prices
            .into_iter()
            .zip(1u64..)
            .map(|(price, sequence)| super::PricePoint::new(price, sequence))
            .collect();
        Self { series }
    }
}

#[async_trait]
impl PriceSeriesProvider for StaticPriceSource {
    async fn fetch_recent(&self, window_size: u64) -> Result<PriceSeries, FetchError> {
        let Some(latest) = self.series.points().last().map(|p| p.sequence) else {
            return Ok(PriceSeries::empty());
        };
        let from = latest.saturating_sub(window_size);
        Ok(self.series.between(from, latest))
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}
