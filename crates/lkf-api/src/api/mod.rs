//! API Layer
//!
//! Read-only resource routers for stations, rivers, basins, water levels
//! and alerts, plus the health check and OpenAPI document.

pub mod common;
pub mod health;
pub mod openapi;

// Resource routers
pub mod stations;
pub mod rivers;
pub mod basins;
pub mod levels;
pub mod alerts;

pub use common::*;
pub use health::{health, HealthResponse};
pub use openapi::{api_doc, ApiDoc};

pub use stations::stations_router;
pub use rivers::rivers_router;
pub use basins::basins_router;
pub use levels::{LevelsState, levels_router};
pub use alerts::alerts_router;
