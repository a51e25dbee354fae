//! End-to-end quote tests

use premium_engine::config::Config;
use premium_engine::feed::{PricePoint, PriceSeries, StaticPriceSource};
use premium_engine::model::{OptionTerms, VolatilitySource};
use premium_engine::money::Money;
use premium_engine::quote::{QuoteError, QuoteService};
use rust_decimal::Decimal;

fn m(s: &str) -> Money {
    Money::from_decimal_str(s).unwrap()
}

fn reference_terms() -> OptionTerms {
    OptionTerms::new(m("1.0"), m("0.000025"), m("0.00002"), 86_400)
}

#[tokio::test]
async fn test_reference_quote_zero_volatility() {
    let service = QuoteService::from_config(&Config::default()).unwrap();
    let quote = service
        .get_quote(&reference_terms(), &StaticPriceSource::default())
        .await
        .unwrap();

    assert_eq!(quote.intrinsic_value, m("0.000005"));
    assert_eq!(quote.volatility_pct, Decimal::ZERO);

    let sum = Money::checked_sum([
        quote.intrinsic_value,
        quote.time_value,
        quote.volatility_component,
        quote.minimum_premium,
    ])
    .unwrap();
    assert_eq!(quote.total_premium, sum);
}

#[tokio::test]
async fn test_zero_amount_is_invalid_terms() {
    let service = QuoteService::default();
    let terms = OptionTerms::new(Money::ZERO, m("0.000025"), m("0.00002"), 86_400);
    let result = service.get_quote(&terms, &StaticPriceSource::default()).await;
    assert!(matches!(result, Err(QuoteError::InvalidTerms(_))));
}

#[tokio::test]
async fn test_out_of_the_money_has_no_intrinsic() {
    let service = QuoteService::default();
    let terms = OptionTerms::new(m("3"), m("0.00002"), m("0.000025"), 3_600);
    let source = StaticPriceSource::from_prices([m("0.00002"), m("0.000021"), m("0.000019")]);

    let quote = service.get_quote(&terms, &source).await.unwrap();
    assert_eq!(quote.intrinsic_value, Money::ZERO);
    assert!(quote.total_premium >= quote.minimum_premium);
    assert!(quote.volatility_component > Money::ZERO);
}

#[tokio::test]
async fn test_repeated_quotes_identical() {
    let service = QuoteService::default();
    let series = PriceSeries::new(vec![
        PricePoint::new(m("100"), 1),
        PricePoint::new(m("105"), 2),
        PricePoint::new(m("100"), 3),
    ]);
    let source = StaticPriceSource::new(series);

    let first = service.get_quote(&reference_terms(), &source).await.unwrap();
    for _ in 0..5 {
        let again = service.get_quote(&reference_terms(), &source).await.unwrap();
        assert_eq!(again, first);
    }
    assert!(first.volatility_pct > Decimal::ZERO);
}

#[tokio::test]
async fn test_view_serializes_money_as_strings() {
    let service = QuoteService::default();
    let quote = service
        .get_quote(&reference_terms(), &StaticPriceSource::default())
        .await
        .unwrap();

    let json = serde_json::to_value(service.view(&quote)).unwrap();
    assert_eq!(json["intrinsicValue"], "0.000005");
    assert_eq!(json["volatilityPct"], "0.00");
    assert!(json["totalPremium"].is_string());
    assert_eq!(
        quote.volatility_source,
        VolatilitySource::Insufficient { points: 0 }
    );
}
