//! Sri Lanka Flood Data API Server
//!
//! Serves river gauge, basin and flood alert data over HTTP together with
//! the static dashboard.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lkf_api::{build_gateway, GatewayConfig, TrendWindow};
use lkf_provider::{create_provider, ProviderConfig};

/// Sri Lanka Flood Data API
#[derive(Parser, Debug)]
#[command(name = "lkf-server")]
#[command(about = "Sri Lanka river water level and flood alert API")]
struct Args {
    /// Listen port
    #[arg(long, env = "LKF_API_PORT", default_value = "8000")]
    port: u16,

    /// Bind address
    #[arg(long, env = "LKF_API_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Directory holding index.html and static/
    #[arg(long, env = "LKF_CONTENT_ROOT", default_value = "web")]
    content_root: PathBuf,

    /// Comma separated CORS origins; `*` reflects any origin
    #[arg(long, env = "LKF_ALLOWED_ORIGINS", default_value = "*", value_delimiter = ',')]
    allowed_origins: Vec<String>,

    /// Data provider: snapshot, http
    #[arg(long, env = "LKF_PROVIDER", default_value = "snapshot")]
    provider: String,

    /// Snapshot document for the snapshot provider
    #[arg(long, env = "LKF_SNAPSHOT_PATH", default_value = "data/snapshot.json")]
    snapshot_path: PathBuf,

    /// Snapshot document URL for the http provider
    #[arg(long, env = "LKF_UPSTREAM_URL")]
    upstream_url: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long, env = "LKF_UPSTREAM_TIMEOUT_SECS", default_value = "30")]
    upstream_timeout_secs: u64,

    /// Default trend window in days
    #[arg(long, env = "LKF_TREND_DEFAULT_DAYS", default_value = "7")]
    trend_default_days: u32,

    /// Maximum trend window in days
    #[arg(long, env = "LKF_TREND_MAX_DAYS", default_value = "30")]
    trend_max_days: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .init();

    let args = Args::parse();

    info!("Starting Sri Lanka Flood Data API v{}", env!("CARGO_PKG_VERSION"));

    let provider = create_provider(&ProviderConfig {
        provider: args.provider.clone(),
        snapshot_path: args.snapshot_path.clone(),
        upstream_url: args.upstream_url.clone(),
        upstream_timeout: Duration::from_secs(args.upstream_timeout_secs),
    })
    .context("Failed to create data provider")?;
    info!("Data provider: {}", provider.name());

    let config = GatewayConfig::default()
        .with_content_root(args.content_root)
        .with_allowed_origins(args.allowed_origins)
        .with_trend_window(TrendWindow {
            default_days: args.trend_default_days,
            max_days: args.trend_max_days,
        });

    let app = build_gateway(&config, provider).context("Failed to build gateway")?;

    let addr = format!("{}:{}", args.host, args.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);
    info!("Dashboard: http://{}/dashboard, API docs: http://{}/docs", addr, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["lkf-server"]);
        assert_eq!(args.port, 8000);
        assert_eq!(args.host, "0.0.0.0");
        assert_eq!(args.allowed_origins, vec!["*"]);
        assert_eq!(args.provider, "snapshot");
        assert_eq!(args.trend_default_days, 7);
        assert_eq!(args.trend_max_days, 30);
    }

    #[test]
    fn test_origin_list() {
        let args = Args::parse_from([
            "lkf-server",
            "--allowed-origins",
            "http://localhost:3000,https://floods.example.lk",
        ]);
        assert_eq!(
            args.allowed_origins,
            vec!["http://localhost:3000", "https://floods.example.lk"]
        );
    }
}
