//! Integration tests for price history sources

use premium_engine::config::{FeedConfig, FeedSource};
use premium_engine::feed::{provider_from_config, FilePriceSource, PriceSeriesProvider};
use premium_engine::model::{OptionTerms, VolatilitySource};
use premium_engine::money::Money;
use premium_engine::quote::QuoteService;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn terms() -> OptionTerms {
    OptionTerms::new(
        Money::ONE,
        Money::from_decimal_str("0.000025").unwrap(),
        Money::from_decimal_str("0.00002").unwrap(),
        86_400,
    )
}

#[tokio::test]
async fn test_file_source_quote() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prices.json");
    std::fs::write(
        &path,
        r#"[
            {"price": "100", "sequence": 1},
            {"price": "105", "sequence": 2},
            {"price": "100", "sequence": 3}
        ]"#,
    )
    .unwrap();

    let source = FilePriceSource::new(&path);
    let quote = QuoteService::default().get_quote(&terms(), &source).await.unwrap();
    assert_eq!(
        quote.volatility_source,
        VolatilitySource::Estimated {
            points: 3,
            returns: 2
        }
    );
}

#[tokio::test]
async fn test_rpc_source_quote() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "eth_blockNumber" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0", "id": 1, "result": "0x64"
        })))
        .mount(&server)
        .await;

    let word = |raw: u128| format!("0x{:064x}", raw);
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "eth_getLogs" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 2,
            "result": [
                { "blockNumber": "0x10", "data": word(20_000_000_000_000) },
                { "blockNumber": "0x20", "data": word(21_000_000_000_000) },
                { "blockNumber": "0x30", "data": word(20_500_000_000_000) },
            ]
        })))
        .mount(&server)
        .await;

    let config = FeedConfig {
        source: FeedSource::Rpc,
        rpc_url: Some(server.uri()),
        contract_address: Some("0x00000000000000000000000000000000000000aa".to_string()),
        event_topic: Some(format!("0x{}", "ab".repeat(32))),
        ..FeedConfig::default()
    };
    let provider = provider_from_config(&config).unwrap();
    assert_eq!(provider.source_name(), "rpc");

    let quote = QuoteService::default()
        .get_quote(&terms(), provider.as_ref())
        .await
        .unwrap();
    assert!(matches!(
        quote.volatility_source,
        VolatilitySource::Estimated { points: 3, .. }
    ));
    assert!(quote.volatility_component > Money::ZERO);
}

#[tokio::test]
async fn test_unreachable_rpc_degrades_to_zero_volatility() {
    let config = FeedConfig {
        source: FeedSource::Rpc,
        rpc_url: Some("http://127.0.0.1:1".to_string()),
        contract_address: Some("0xaa".to_string()),
        event_topic: Some("0x11".to_string()),
        timeout_secs: 2,
        ..FeedConfig::default()
    };
    let provider = provider_from_config(&config).unwrap();

    let quote = QuoteService::default()
        .get_quote(&terms(), provider.as_ref())
        .await
        .unwrap();
    assert!(matches!(
        quote.volatility_source,
        VolatilitySource::Unavailable { .. }
    ));
    assert_eq!(quote.volatility_component, Money::ZERO);
}

#[tokio::test]
async fn test_missing_file_degrades() {
    let source = FilePriceSource::new("/nonexistent/prices.json");
    let quote = QuoteService::default().get_quote(&terms(), &source).await.unwrap();
    assert!(matches!(
        quote.volatility_source,
        VolatilitySource::Unavailable { .. }
    ));
}
