//! Water Levels API
//!
//! Latest gauge level per station and the recent reading history used by
//! dashboard trend charts. The history window is bounded by the gateway's
//! [`TrendWindow`]; an out-of-range `days` is rejected rather than clamped.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use lkf_common::{Reading, WaterLevel};
use lkf_provider::DataProvider;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::api::common::{ApiQuery, ApiResult, ResourceState};
use crate::config::{GatewayConfig, TrendWindow, MAX_TREND_DAYS};
use crate::error::{GatewayError, Result};

#[derive(Clone)]
pub struct LevelsState {
    pub provider: Arc<dyn DataProvider>,
    pub window: TrendWindow,
}

/// Query parameters for station trend
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TrendQuery {
    /// Days of history counted back from the latest reading
    pub days: Option<u32>,
}

impl TrendWindow {
    /// Check the window is usable: both bounds positive, default within max,
    /// max no larger than [`MAX_TREND_DAYS`]
    pub fn validate(&self) -> Result<()> {
        if self.default_days == 0 || self.max_days == 0 {
            return Err(GatewayError::configuration(
                "Trend window days must be greater than zero",
            ));
        }
        if self.max_days > MAX_TREND_DAYS {
            return Err(GatewayError::configuration(format!(
                "Trend maximum of {} days exceeds the limit of {} days",
                self.max_days, MAX_TREND_DAYS
            )));
        }
        if self.default_days > self.max_days {
            return Err(GatewayError::configuration(format!(
                "Trend default of {} days exceeds maximum of {} days",
                self.default_days, self.max_days
            )));
        }
        Ok(())
    }

    /// Resolve the requested window against the configured bounds
    pub fn resolve(&self, requested: Option<u32>) -> Result<u32> {
        match requested {
            None => Ok(self.default_days),
            Some(days) if (1..=self.max_days).contains(&days) => Ok(days),
            Some(days) => Err(GatewayError::validation(format!(
                "days must be between 1 and {}, got {}",
                self.max_days, days
            ))),
        }
    }
}

/// List latest water levels
#[utoipa::path(
    get,
    path = "/api/levels",
    tag = "Water Levels",
    responses(
        (status = 200, description = "Latest level for each station with a reading", body = [WaterLevel]),
        (status = 502, description = "Data provider unavailable")
    )
)]
pub async fn list_levels(State(state): State<LevelsState>) -> ApiResult<Vec<WaterLevel>> {
    Ok(Json(state.provider.levels().await?))
}

/// Get latest water level for a station
#[utoipa::path(
    get,
    path = "/api/levels/{station_id}",
    tag = "Water Levels",
    params(
        ("station_id" = String, Path, description = "Station ID")
    ),
    responses(
        (status = 200, description = "Latest level", body = WaterLevel),
        (status = 404, description = "Station not found or has no readings")
    )
)]
pub async fn get_level(
    State(state): State<LevelsState>,
    Path(station_id): Path<String>,
) -> ApiResult<WaterLevel> {
    let level = state.provider.level(&station_id).await?
        .ok_or_else(|| GatewayError::not_found("Water level", &station_id))?;

    Ok(Json(level))
}

/// Get reading history for a station
#[utoipa::path(
    get,
    path = "/api/levels/{station_id}/trend",
    tag = "Water Levels",
    params(
        ("station_id" = String, Path, description = "Station ID"),
        TrendQuery
    ),
    responses(
        (status = 200, description = "Readings, oldest first", body = [Reading]),
        (status = 400, description = "days out of range"),
        (status = 404, description = "Station not found")
    )
)]
pub async fn get_trend(
    State(state): State<LevelsState>,
    Path(station_id): Path<String>,
    ApiQuery(query): ApiQuery<TrendQuery>,
) -> ApiResult<Vec<Reading>> {
    let days = state.window.resolve(query.days)?;

    let readings = state.provider.station_history(&station_id, days).await?
        .ok_or_else(|| GatewayError::not_found("Station", &station_id))?;

    Ok(Json(readings))
}

/// Create water levels router
///
/// Fails if the configured trend window is unusable.
pub fn levels_router(state: ResourceState, config: &GatewayConfig) -> Result<Router> {
    config.trend_window.validate()?;

    let state = LevelsState {
        provider: state.provider,
        window: config.trend_window,
    };

    Ok(Router::new()
        .route("/", get(list_levels))
        .route("/:station_id", get(get_level))
        .route("/:station_id/trend", get(get_trend))
        .with_state(state))
}
