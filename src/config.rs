//! Configuration types for premium-engine

use crate::telemetry::LogFormat;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Example configuration shipped with the crate
pub const EXAMPLE_CONFIG: &str = include_str!("../config.toml.example");

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub quote: QuoteConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Premium model constants
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Minimum premium in basis points of notional
    #[serde(default = "default_base_rate_bps")]
    pub base_rate_bps: u32,

    /// Fraction of the volatility percentage charged
    #[serde(default = "default_volatility_scaling")]
    pub volatility_scaling: Decimal,

    /// Multiplier on sqrt(year fraction)
    #[serde(default = "default_time_decay_factor")]
    pub time_decay_factor: Decimal,

    /// Seconds per year for the time fraction
    #[serde(default = "default_seconds_per_year")]
    pub seconds_per_year: u64,
}

fn default_base_rate_bps() -> u32 {
    10 // 0.10%
}
fn default_volatility_scaling() -> Decimal {
    Decimal::new(5, 1) // 0.5
}
fn default_time_decay_factor() -> Decimal {
    Decimal::new(7, 1) // 0.7
}
fn default_seconds_per_year() -> u64 {
    31_536_000
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_rate_bps: 10,
            volatility_scaling: Decimal::new(5, 1),
            time_decay_factor: Decimal::new(7, 1),
            seconds_per_year: 31_536_000,
        }
    }
}

/// Quote orchestration configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuoteConfig {
    /// Sequence steps (blocks) of history to fetch
    #[serde(default = "default_window_size")]
    pub window_size: u64,

    /// Fractional digits for money fields at the output boundary
    #[serde(default = "default_display_decimals")]
    pub display_decimals: u32,

    /// Fractional digits for the volatility percentage at the output boundary
    #[serde(default = "default_volatility_decimals")]
    pub volatility_decimals: u32,

    /// Fail the quote on transport errors instead of using zero volatility
    #[serde(default)]
    pub fail_on_fetch_error: bool,
}

fn default_window_size() -> u64 {
    200
}
fn default_display_decimals() -> u32 {
    6
}
fn default_volatility_decimals() -> u32 {
    2
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            window_size: 200,
            display_decimals: 6,
            volatility_decimals: 2,
            fail_on_fetch_error: false,
        }
    }
}

/// Which price history source to use
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedSource {
    /// No history; quotes use zero volatility unless prices are given inline
    #[default]
    Static,
    /// JSON file of price points
    File,
    /// Contract event logs over JSON-RPC
    Rpc,
}

/// Price history configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedConfig {
    #[serde(default)]
    pub source: FeedSource,

    /// Path of the JSON history (file source)
    pub path: Option<PathBuf>,

    /// JSON-RPC endpoint (rpc source)
    pub rpc_url: Option<String>,

    /// Contract emitting price events (rpc source)
    pub contract_address: Option<String>,

    /// Topic0 of the price event (rpc source)
    pub event_topic: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Index of the 32-byte log data word holding the price
    #[serde(default)]
    pub price_word_index: usize,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            source: FeedSource::Static,
            path: None,
            rpc_url: None,
            contract_address: None,
            event_topic: None,
            timeout_secs: 10,
            price_word_index: 0,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Prometheus exporter port; no exporter when unset
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// The bundled example configuration
    pub fn example() -> anyhow::Result<Self> {
        Self::from_toml(EXAMPLE_CONFIG)
    }
}
