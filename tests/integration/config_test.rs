//! Configuration loading tests

use premium_engine::config::Config;
use premium_engine::quote::QuoteService;

#[test]
fn test_example_config_file_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml.example");
    let config = Config::load(path).unwrap();
    assert_eq!(config.quote.window_size, 200);
    assert_eq!(config.quote.display_decimals, 6);
    assert!(QuoteService::from_config(&config).is_ok());
}

#[test]
fn test_invalid_model_params_rejected() {
    let config = Config::from_toml("[model]\ntime_decay_factor = -0.7\n").unwrap();
    assert!(QuoteService::from_config(&config).is_err());
}
