//! Prometheus metrics

use std::net::SocketAddr;
use std::time::Duration;

const PRICE_FETCH_LATENCY: &str = "premium_price_fetch_latency_ms";
const QUOTES_TOTAL: &str = "premium_quotes_total";
const FETCH_FAILURES_TOTAL: &str = "premium_fetch_failures_total";
const LAST_VOLATILITY: &str = "premium_last_volatility_pct";

/// Outcome label for a finished quote request
#[derive(Debug, Clone, Copy)]
pub enum QuoteOutcome {
    /// Quote produced
    Quoted,
    /// Terms rejected
    Rejected,
    /// Fetch cancelled
    Cancelled,
    /// Arithmetic or transport failure
    Failed,
}

impl QuoteOutcome {
    fn as_str(self) -> &'static str {
        match self {
            QuoteOutcome::Quoted => "quoted",
            QuoteOutcome::Rejected => "rejected",
            QuoteOutcome::Cancelled => "cancelled",
            QuoteOutcome::Failed => "failed",
        }
    }
}

/// Start the Prometheus exporter on the given port
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to start metrics exporter: {}", e))?;

    tracing::info!(%addr, "Prometheus metrics exporter listening");
    Ok(())
}

/// Record how long a price history fetch took
pub fn record_fetch_latency(source: &'static str, duration: Duration) {
    ::metrics::histogram!(PRICE_FETCH_LATENCY, "source" => source)
        .record(duration.as_secs_f64() * 1000.0);
}

/// Count a failed price history fetch
pub fn record_fetch_failure(source: &'static str) {
    ::metrics::counter!(FETCH_FAILURES_TOTAL, "source" => source).increment(1);
}

/// Count a finished quote request
pub fn record_quote(outcome: QuoteOutcome) {
    ::metrics::counter!(QUOTES_TOTAL, "outcome" => outcome.as_str()).increment(1);
}

/// Publish the latest volatility estimate
pub fn set_volatility(volatility_pct: f64) {
    ::metrics::gauge!(LAST_VOLATILITY).set(volatility_pct);
}
