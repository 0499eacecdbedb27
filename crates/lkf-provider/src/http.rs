//! HTTP provider
//!
//! Fetches the snapshot document from an upstream URL on every query and
//! derives the requested view from it. No caching and no retries: a failed
//! fetch surfaces to the caller as-is.

use async_trait::async_trait;
use lkf_common::{Basin, FloodAlert, Reading, River, Snapshot, StationStatus, WaterLevel};
use std::time::Duration;
use tracing::{debug, warn};

use crate::snapshot::{validate, SnapshotView};
use crate::{DataProvider, ProviderError, Result};

/// HTTP provider configuration
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    /// URL of the snapshot document
    pub url: String,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Request timeout
    pub request_timeout: Duration,
}

impl Default for HttpProviderConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

pub struct HttpProvider {
    config: HttpProviderConfig,
    client: reqwest::Client,
}

impl HttpProvider {
    pub fn new(config: HttpProviderConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(ProviderError::Configuration("Upstream URL must not be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { config, client })
    }

    /// Fetch and validate the upstream snapshot
    pub async fn fetch(&self) -> Result<Snapshot> {
        let url = &self.config.url;
        debug!("Fetching snapshot from {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Upstream {} returned {}", url, status);
            return Err(ProviderError::UpstreamStatus {
                status: status.as_u16(),
                url: url.clone(),
            });
        }

        let snapshot: Snapshot = response.json().await?;
        validate(&snapshot)?;
        debug!(
            "Fetched snapshot: {} stations, {} readings",
            snapshot.stations.len(),
            snapshot.readings.len()
        );
        Ok(snapshot)
    }
}

#[async_trait]
impl DataProvider for HttpProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn stations(&self) -> Result<Vec<StationStatus>> {
        let snapshot = self.fetch().await?;
        Ok(SnapshotView::new(&snapshot).station_statuses())
    }

    async fn rivers(&self) -> Result<Vec<River>> {
        let snapshot = self.fetch().await?;
        Ok(SnapshotView::new(&snapshot).rivers())
    }

    async fn basins(&self) -> Result<Vec<Basin>> {
        let snapshot = self.fetch().await?;
        Ok(SnapshotView::new(&snapshot).basins())
    }

    async fn levels(&self) -> Result<Vec<WaterLevel>> {
        let snapshot = self.fetch().await?;
        Ok(SnapshotView::new(&snapshot).levels())
    }

    async fn station_history(&self, station_id: &str, days: u32) -> Result<Option<Vec<Reading>>> {
        let snapshot = self.fetch().await?;
        Ok(SnapshotView::new(&snapshot).station_history(station_id, days))
    }

    async fn river_stations(&self, river_id: &str) -> Result<Option<Vec<StationStatus>>> {
        let snapshot = self.fetch().await?;
        Ok(SnapshotView::new(&snapshot).river_stations(river_id))
    }

    async fn basin_rivers(&self, basin_id: &str) -> Result<Option<Vec<River>>> {
        let snapshot = self.fetch().await?;
        Ok(SnapshotView::new(&snapshot).basin_rivers(basin_id))
    }

    async fn alerts(&self) -> Result<Vec<FloodAlert>> {
        let snapshot = self.fetch().await?;
        Ok(SnapshotView::new(&snapshot).alerts())
    }
}
