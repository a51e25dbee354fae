//! CLI interface for premium-engine
//!
//! Provides subcommands for:
//! - `quote`: Price a covered call
//! - `volatility`: Show realized volatility of recent history
//! - `config`: Show effective configuration

mod quote;
mod volatility;

pub use quote::QuoteArgs;
pub use volatility::VolatilityArgs;

use crate::config::Config;
use crate::feed::{self, PriceSeriesProvider, StaticPriceSource};
use crate::money::Money;
use clap::{Parser, Subcommand};
use tokio::sync::watch;

#[derive(Parser, Debug)]
#[command(name = "premium-engine")]
#[command(about = "Covered-call premium estimation from on-chain price history")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price a covered call
    Quote(QuoteArgs),
    /// Show realized volatility of recent price history
    Volatility(VolatilityArgs),
    /// Show effective configuration
    Config,
}

/// Inline prices take precedence over the configured feed
fn select_provider(
    inline_prices: &[String],
    config: &Config,
) -> anyhow::Result<Box<dyn PriceSeriesProvider>> {
    if inline_prices.is_empty() {
        return feed::provider_from_config(&config.feed);
    }

    let prices = inline_prices
        .iter()
        .map(|p| Money::from_decimal_str(p.trim()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Box::new(StaticPriceSource::from_prices(prices)))
}

/// Flag flipped to true on Ctrl-C
fn ctrl_c_cancellation() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling");
            let _ = tx.send(true);
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quote_command() {
        let cli = Cli::try_parse_from([
            "premium-engine",
            "quote",
            "--amount",
            "1.0",
            "--price",
            "0.000025",
            "--strike",
            "0.00002",
            "--duration",
            "86400",
            "--prices",
            "100,105,100",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Quote(args) => {
                assert_eq!(args.amount, "1.0");
                assert_eq!(args.duration, 86_400);
                assert_eq!(args.prices, vec!["100", "105", "100"]);
                assert!(args.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.config, "config.toml");
    }

    #[test]
    fn test_parse_config_flag() {
        let cli = Cli::try_parse_from(["premium-engine", "-c", "custom.toml", "config"]).unwrap();
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::Config));
    }

    #[test]
    fn test_quote_requires_terms() {
        assert!(Cli::try_parse_from(["premium-engine", "quote", "--amount", "1"]).is_err());
    }

    #[test]
    fn test_select_provider_inline() {
        let prices = vec!["100".to_string(), " 105".to_string()];
        let provider = select_provider(&prices, &Config::default()).unwrap();
        assert_eq!(provider.source_name(), "static");
    }

    #[test]
    fn test_select_provider_inline_invalid() {
        let prices = vec!["abc".to_string()];
        assert!(select_provider(&prices, &Config::default()).is_err());
    }
}
