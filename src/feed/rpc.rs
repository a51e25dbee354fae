//! JSON-RPC event log price source
//!
//! Reads price events emitted by a token contract. Each matching log carries
//! the price as a 32-byte big-endian word in its data, already scaled to 18
//! decimals; the block number is used as the sequence.

use super::{FetchError, PricePoint, PriceSeries, PriceSeriesProvider};
use crate::money::Money;
use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Bytes in one ABI word
const WORD_LEN: usize = 32;

/// Configuration for the JSON-RPC log source
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL
    pub url: String,
    /// Contract emitting the price events
    pub contract_address: String,
    /// Topic0 of the price event
    pub event_topic: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Index of the 32-byte data word holding the price
    pub price_word_index: usize,
}

impl RpcConfig {
    pub fn new(
        url: impl Into<String>,
        contract_address: impl Into<String>,
        event_topic: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            contract_address: contract_address.into(),
            event_topic: event_topic.into(),
            timeout: Duration::from_secs(10),
            price_word_index: 0,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn price_word_index(mut self, index: usize) -> Self {
        self.price_word_index = index;
        self
    }
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcLog {
    block_number: Option<String>,
    data: String,
    #[serde(default)]
    removed: bool,
}

/// Price history from contract event logs over JSON-RPC
pub struct RpcLogPriceSource {
    config: RpcConfig,
    client: Client,
    next_id: AtomicU64,
}

impl RpcLogPriceSource {
    /// Create a source; fails only if the HTTP client cannot be built
    pub fn new(config: RpcConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("building JSON-RPC HTTP client")?;

        Ok(Self {
            config,
            client,
            next_id: AtomicU64::new(1),
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> anyhow::Result<T> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response = self
            .client
            .post(&self.config.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    anyhow!("{} timed out after {:?}", method, self.config.timeout)
                } else {
                    anyhow!(e).context(format!("{} request failed", method))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("JSON-RPC HTTP error: {} - {}", status, body);
        }

        let body: RpcResponse<T> = response
            .json()
            .await
            .with_context(|| format!("decoding {} response", method))?;

        if let Some(err) = body.error {
            bail!("JSON-RPC error {}: {}", err.code, err.message);
        }
        body.result
            .ok_or_else(|| anyhow!("{} response has no result", method))
    }

    async fn latest_block(&self) -> anyhow::Result<u64> {
        let hex: String = self.call("eth_blockNumber", json!([])).await?;
        parse_quantity(&hex)
    }

    async fn fetch_logs(&self, from_block: u64, to_block: u64) -> anyhow::Result<Vec<RpcLog>> {
        let filter = json!({
            "address": self.config.contract_address,
            "topics": [self.config.event_topic],
            "fromBlock": format!("0x{:x}", from_block),
            "toBlock": format!("0x{:x}", to_block),
        });
        self.call("eth_getLogs", json!([filter])).await
    }

    async fn load_window(&self, window_size: u64) -> anyhow::Result<PriceSeries> {
        let started = Instant::now();
        let latest = self.latest_block().await?;
        let from_block = latest.saturating_sub(window_size);
        let logs = self.fetch_logs(from_block, latest).await?;

        let mut points = Vec::with_capacity(logs.len());
        for log in logs.iter().filter(|l| !l.removed) {
            let Some(block) = log.block_number.as_deref() else {
                continue; // pending
            };
            let sequence = parse_quantity(block)?;
            let price = decode_price_word(&log.data, self.config.price_word_index)?;
            points.push(PricePoint::new(price, sequence));
        }

        tracing::debug!(
            from_block,
            to_block = latest,
            logs = logs.len(),
            points = points.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fetched price events"
        );

        Ok(PriceSeries::new(points))
    }
}

#[async_trait]
impl PriceSeriesProvider for RpcLogPriceSource {
    async fn fetch_recent(&self, window_size: u64) -> Result<PriceSeries, FetchError> {
        self.load_window(window_size)
            .await
            .map_err(FetchError::Transport)
    }

    fn source_name(&self) -> &'static str {
        "rpc"
    }
}

/// Parse a JSON-RPC hex quantity such as `"0x1b4"`
fn parse_quantity(quantity: &str) -> anyhow::Result<u64> {
    let digits = quantity
        .strip_prefix("0x")
        .ok_or_else(|| anyhow!("quantity {:?} lacks 0x prefix", quantity))?;
    u64::from_str_radix(digits, 16).with_context(|| format!("invalid quantity {:?}", quantity))
}

/// Extract the `index`th 32-byte word of log data as a price
fn decode_price_word(data: &str, index: usize) -> anyhow::Result<Money> {
    let stripped = data
        .strip_prefix("0x")
        .ok_or_else(|| anyhow!("log data lacks 0x prefix"))?;
    let bytes = hex::decode(stripped).context("log data is not valid hex")?;

    let word = index
        .checked_mul(WORD_LEN)
        .and_then(|start| bytes.get(start..start.checked_add(WORD_LEN)?))
        .ok_or_else(|| anyhow!("log data has no word {}", index))?;

    let (high, low) = word.split_at(WORD_LEN / 2);
    if high.iter().any(|&b| b != 0) {
        bail!("price word exceeds 128 bits: 0x{}", hex::encode(word));
    }
    let mut raw = [0u8; WORD_LEN / 2];
    raw.copy_from_slice(low);
    Ok(Money::from_raw(u128::from_be_bytes(raw)))
}
