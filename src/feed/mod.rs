//! Price history feeds
//!
//! Sources of recent price observations used for volatility estimation

mod file;
mod rpc;
mod static_source;
mod types;

pub use file::FilePriceSource;
pub use rpc::{RpcConfig, RpcLogPriceSource};
pub use static_source::StaticPriceSource;
pub use types::{PricePoint, PriceSeries};

use crate::config::{FeedConfig, FeedSource};
use anyhow::Context;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Price history fetch errors
#[derive(Debug, Error)]
pub enum FetchError {
    /// The fetch was cancelled before completing
    #[error("Price fetch cancelled")]
    Cancelled,
    /// Any transport, decoding or timeout failure from the source
    #[error("Price fetch failed: {0}")]
    Transport(#[source] anyhow::Error),
}

impl FetchError {
    /// Wrap any error as a transport failure
    pub fn transport(err: impl Into<anyhow::Error>) -> Self {
        FetchError::Transport(err.into())
    }
}

/// Trait for price history implementations
#[async_trait]
pub trait PriceSeriesProvider: Send + Sync {
    /// Fetch the points with sequence in `[latest - window_size, latest]`
    async fn fetch_recent(&self, window_size: u64) -> Result<PriceSeries, FetchError>;

    /// Short name for logs
    fn source_name(&self) -> &'static str;
}

/// Build the provider selected by the feed configuration
pub fn provider_from_config(config: &FeedConfig) -> anyhow::Result<Box<dyn PriceSeriesProvider>> {
    match config.source {
        FeedSource::Static => Ok(Box::new(StaticPriceSource::default())),
        FeedSource::File => {
            let path = config
                .path
                .as_ref()
                .context("feed.path is required for the file source")?;
            Ok(Box::new(FilePriceSource::new(path)))
        }
        FeedSource::Rpc => {
            let url = config
                .rpc_url
                .as_ref()
                .context("feed.rpc_url is required for the rpc source")?;
            let address = config
                .contract_address
                .as_ref()
                .context("feed.contract_address is required for the rpc source")?;
            let topic = config
                .event_topic
                .as_ref()
                .context("feed.event_topic is required for the rpc source")?;

            let rpc = RpcConfig::new(url, address, topic)
                .timeout(Duration::from_secs(config.timeout_secs))
                .price_word_index(config.price_word_index);
            Ok(Box::new(RpcLogPriceSource::new(rpc)?))
        }
    }
}
