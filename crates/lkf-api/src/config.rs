//! Gateway configuration
//!
//! Built once at process start and owned by the gateway; never mutated.

use std::path::PathBuf;

/// Service identifier reported by `/health`
pub const SERVICE_ID: &str = "lk-flood-api";

/// Upstream data source reported by `/health`
pub const DATA_SOURCE_URL: &str = "https://github.com/nuuuwan/lk_dmc_vis";

/// Largest configurable trend window, roughly ten years
pub const MAX_TREND_DAYS: u32 = 3650;

/// Window limits for `/api/levels/{station_id}/trend`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendWindow {
    pub default_days: u32,
    pub max_days: u32,
}

impl Default for TrendWindow {
    fn default() -> Self {
        Self {
            default_days: 7,
            max_days: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub title: String,
    pub version: String,
    pub description: String,
    /// Allowed CORS origins; a single `*` reflects any request origin
    pub allowed_origins: Vec<String>,
    /// Directory holding `index.html` and the `static/` assets
    pub content_root: PathBuf,
    pub trend_window: TrendWindow,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            title: "Sri Lanka Flood Data API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "REST API for Sri Lanka river water level and flood monitoring data. \
                          Data sourced from the Disaster Management Center (DMC) via nuuuwan/lk_dmc_vis."
                .to_string(),
            allowed_origins: vec!["*".to_string()],
            content_root: PathBuf::from("web"),
            trend_window: TrendWindow::default(),
        }
    }
}

impl GatewayConfig {
    pub fn with_content_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.content_root = root.into();
        self
    }

    pub fn with_allowed_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_origins = origins.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_trend_window(mut self, trend_window: TrendWindow) -> Self {
        self.trend_window = trend_window;
        self
    }

    /// Whether any origin is allowed
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o.trim() == "*")
    }
}
