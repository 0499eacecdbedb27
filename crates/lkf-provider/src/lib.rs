//! Data providers for the flood data API
//!
//! A provider answers read queries about stations, rivers, basins, water
//! levels and alerts. Backends:
//! - Snapshot file loaded once at startup (default)
//! - HTTP upstream serving the same snapshot document

use async_trait::async_trait;
use lkf_common::{Basin, FloodAlert, Reading, River, StationStatus, WaterLevel};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

mod http;
pub mod snapshot;

pub use http::{HttpProvider, HttpProviderConfig};
pub use snapshot::{SnapshotProvider, SnapshotView};

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Upstream returned status {status} for {url}")]
    UpstreamStatus { status: u16, url: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, ProviderError>;

/// Read access to current hydrological data
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Provider name
    fn name(&self) -> &str;

    /// All stations in registry order, with their latest reading
    async fn stations(&self) -> Result<Vec<StationStatus>>;

    /// Rivers grouped from the station registry
    async fn rivers(&self) -> Result<Vec<River>>;

    /// Basins grouped from the station registry
    async fn basins(&self) -> Result<Vec<Basin>>;

    /// Latest level for every station that has a reading
    async fn levels(&self) -> Result<Vec<WaterLevel>>;

    /// Readings for a station within `days` of its latest reading, oldest
    /// first; `None` when the station is unknown
    async fn station_history(&self, station_id: &str, days: u32) -> Result<Option<Vec<Reading>>>;

    /// Stations on a river; `None` when the river is unknown
    async fn river_stations(&self, river_id: &str) -> Result<Option<Vec<StationStatus>>>;

    /// Rivers in a basin; `None` when the basin is unknown
    async fn basin_rivers(&self, basin_id: &str) -> Result<Option<Vec<River>>>;

    /// Active alerts, most severe first
    async fn alerts(&self) -> Result<Vec<FloodAlert>>;

    async fn station(&self, station_id: &str) -> Result<Option<StationStatus>> {
        Ok(self.stations().await?.into_iter().find(|s| s.station.id == station_id))
    }

    async fn river(&self, river_id: &str) -> Result<Option<River>> {
        Ok(self.rivers().await?.into_iter().find(|r| r.id == river_id))
    }

    async fn basin(&self, basin_id: &str) -> Result<Option<Basin>> {
        Ok(self.basins().await?.into_iter().find(|b| b.id == basin_id))
    }

    async fn level(&self, station_id: &str) -> Result<Option<WaterLevel>> {
        Ok(self.levels().await?.into_iter().find(|l| l.station_id == station_id))
    }

    async fn alert(&self, alert_id: &str) -> Result<Option<FloodAlert>> {
        Ok(self.alerts().await?.into_iter().find(|a| a.id == alert_id))
    }
}

/// Configuration for providers
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider: String,
    pub snapshot_path: PathBuf,
    pub upstream_url: Option<String>,
    pub upstream_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: "snapshot".to_string(),
            snapshot_path: PathBuf::from("data/snapshot.json"),
            upstream_url: None,
            upstream_timeout: Duration::from_secs(30),
        }
    }
}

/// Create a provider based on configuration
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn DataProvider>> {
    match config.provider.as_str() {
        "snapshot" => {
            info!("Using snapshot data provider: {}", config.snapshot_path.display());
            let provider = SnapshotProvider::from_file(&config.snapshot_path)?;
            Ok(Arc::new(provider))
        }
        "http" => {
            let url = config.upstream_url.as_ref()
                .ok_or_else(|| ProviderError::Configuration("Upstream URL required for http provider".to_string()))?;
            info!("Using HTTP data provider: {}", url);
            let provider = HttpProvider::new(HttpProviderConfig {
                url: url.clone(),
                request_timeout: config.upstream_timeout,
                ..HttpProviderConfig::default()
            })?;
            Ok(Arc::new(provider))
        }
        other => Err(ProviderError::Configuration(format!("Unknown provider: {}", other))),
    }
}
