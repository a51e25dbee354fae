//! JSON file price source
//!
//! Reads `[{"price": "0.000025", "sequence": 101}, ...]` on every fetch, so
//! an external process can keep the file fresh.

use super::{FetchError, PriceSeries, PriceSeriesProvider};
use anyhow::Context;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Price history backed by a JSON file on disk
#[derive(Debug, Clone)]
pub struct FilePriceSource {
    path: PathBuf,
}

impl FilePriceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> anyhow::Result<PriceSeries> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading price history {}", self.path.display()))?;
        let series: PriceSeries = serde_json::from_str(&content)
            .with_context(|| format!("parsing price history {}", self.path.display()))?;
        Ok(series)
    }
}

#[async_trait]
impl PriceSeriesProvider for FilePriceSource {
    async fn fetch_recent(&self, window_size: u64) -> Result<PriceSeries, FetchError> {
        let series = self.load().await.map_err(FetchError::Transport)?;
        let Some(latest) = series.points().last().map(|p| p.sequence) else {
            return Ok(series);
        };

        let recent = series.between(latest.saturating_sub(window_size), latest);
        tracing::debug!(
            path = ?self.path,
            total = series.len(),
            recent = recent.len(),
            "Loaded price history from file"
        );
        Ok(recent)
    }

    fn source_name(&self) -> &'static str {
        "file"
    }
}
