//! Quote command implementation

use super::{ctrl_c_cancellation, select_provider};
use crate::config::Config;
use crate::model::OptionTerms;
use crate::money::Money;
use crate::quote::{QuoteService, QuoteView};
use anyhow::Context;
use clap::Args;

#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Units of the underlying covered (decimal)
    #[arg(long)]
    pub amount: String,

    /// Current price per unit (decimal)
    #[arg(long)]
    pub price: String,

    /// Strike price per unit (decimal)
    #[arg(long)]
    pub strike: String,

    /// Time to expiry in seconds
    #[arg(long)]
    pub duration: u64,

    /// Inline price history, oldest first; overrides the configured feed
    #[arg(long, value_delimiter = ',')]
    pub prices: Vec<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl QuoteArgs {
    fn terms(&self) -> anyhow::Result<OptionTerms> {
        let amount = Money::from_decimal_str(&self.amount).context("--amount")?;
        let price = Money::from_decimal_str(&self.price).context("--price")?;
        let strike = Money::from_decimal_str(&self.strike).context("--strike")?;
        Ok(OptionTerms::new(amount, price, strike, self.duration))
    }

    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let terms = self.terms()?;
        let service = QuoteService::from_config(config)?;
        let provider = select_provider(&self.prices, config)?;

        tracing::info!(source = provider.source_name(), "Requesting quote");
        let quote = service
            .get_quote_with_cancel(&terms, provider.as_ref(), ctrl_c_cancellation())
            .await?;
        let view = service.view(&quote);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&view)?);
        } else {
            print_table(&view);
        }
        Ok(())
    }
}

fn print_table(view: &QuoteView) {
    println!("Covered call quote");
    println!("  Intrinsic value:      {}", view.intrinsic_value);
    println!("  Time value:           {}", view.time_value);
    println!("  Volatility component: {}", view.volatility_component);
    println!("  Minimum premium:      {}", view.minimum_premium);
    println!("  Total premium:        {}", view.total_premium);
    println!("  Volatility:           {}%", view.volatility_pct);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(amount: &str) -> QuoteArgs {
        QuoteArgs {
            amount: amount.to_string(),
            price: "0.000025".to_string(),
            strike: "0.00002".to_string(),
            duration: 86_400,
            prices: vec![],
            json: false,
        }
    }

    #[test]
    fn test_terms_from_args() {
        let terms = args("1.0").terms().unwrap();
        assert_eq!(terms.amount, Money::ONE);
        assert_eq!(terms.duration_secs, 86_400);
    }

    #[test]
    fn test_terms_bad_amount() {
        let err = args("one").terms().unwrap_err();
        assert!(err.to_string().contains("--amount"));
    }

    #[tokio::test]
    async fn test_execute_zero_amount_fails() {
        let result = args("0").execute(&Config::default()).await;
        assert!(result.is_err());
    }
}
