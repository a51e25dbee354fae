//! Volatility command implementation

use super::{ctrl_c_cancellation, select_provider};
use crate::config::Config;
use crate::quote::QuoteService;
use clap::Args;
use rust_decimal::RoundingStrategy;

#[derive(Args, Debug)]
pub struct VolatilityArgs {
    /// Inline price history, oldest first; overrides the configured feed
    #[arg(long, value_delimiter = ',')]
    pub prices: Vec<String>,
}

impl VolatilityArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let service = QuoteService::from_config(config)?;
        let provider = select_provider(&self.prices, config)?;

        let (volatility, provenance) = service
            .estimate_volatility(provider.as_ref(), Some(ctrl_c_cancellation()))
            .await?;

        let decimals = config.quote.volatility_decimals;
        let shown = volatility.round_dp_with_strategy(decimals, RoundingStrategy::ToZero);
        println!("Realized volatility: {:.*}%", decimals as usize, shown);
        println!("Source: {:?}", provenance);
        Ok(())
    }
}
