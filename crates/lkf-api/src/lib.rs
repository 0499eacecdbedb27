//! Sri Lanka Flood Data API
//!
//! HTTP gateway over a [`lkf_provider::DataProvider`]:
//! - Resource routers under `/api/{stations,rivers,basins,levels,alerts}`
//! - Dashboard pages from an injected content root
//! - `/health`, `/openapi.json` and Swagger UI at `/docs`
//! - Permissive CORS with credentials

pub mod api;
pub mod config;
pub mod error;
pub mod routes;
pub mod static_content;
mod gateway;

pub use config::{GatewayConfig, TrendWindow, DATA_SOURCE_URL, MAX_TREND_DAYS, SERVICE_ID};
pub use error::{GatewayError, Result};
pub use gateway::{build_gateway, build_gateway_with, cors_layer};
pub use routes::{Mount, RouteTable, RouterFactory, API_MOUNTS};
pub use static_content::StaticContent;
