//! Stations API
//!
//! Gauging stations with their latest reading and alert level.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use lkf_common::StationStatus;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::common::{filter_eq, parse_alert_level, ApiQuery, ApiResult, ResourceState};
use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};

/// Query parameters for stations list
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StationsQuery {
    /// Substring of station name, district or river
    pub q: Option<String>,

    /// Filter by district
    pub district: Option<String>,

    /// Filter by river name
    pub river: Option<String>,

    /// Filter by basin name
    pub basin: Option<String>,

    /// Filter by alert level: normal, warning, danger, critical
    pub alert_level: Option<String>,
}

fn matches_search(status: &StationStatus, q: &str) -> bool {
    let q = q.trim().to_lowercase();
    let s = &status.station;
    [&s.name, &s.district, &s.river]
        .iter()
        .any(|field| field.to_lowercase().contains(&q))
}

/// List gauging stations
#[utoipa::path(
    get,
    path = "/api/stations",
    tag = "Stations",
    params(StationsQuery),
    responses(
        (status = 200, description = "Gauging stations", body = [StationStatus]),
        (status = 400, description = "Invalid filter"),
        (status = 502, description = "Data provider unavailable")
    )
)]
pub async fn list_stations(
    State(state): State<ResourceState>,
    ApiQuery(query): ApiQuery<StationsQuery>,
) -> ApiResult<Vec<StationStatus>> {
    let alert_level = parse_alert_level("alert_level", query.alert_level.as_deref())?;

    let stations = state.provider.stations().await?
        .into_iter()
        .filter(|s| query.q.as_deref().map_or(true, |q| matches_search(s, q)))
        .filter(|s| filter_eq(query.district.as_deref(), &s.station.district))
        .filter(|s| filter_eq(query.river.as_deref(), &s.station.river))
        .filter(|s| filter_eq(query.basin.as_deref(), &s.station.basin))
        .filter(|s| alert_level.map_or(true, |level| s.alert_level == level))
        .collect();

    Ok(Json(stations))
}

/// Get station by ID
#[utoipa::path(
    get,
    path = "/api/stations/{station_id}",
    tag = "Stations",
    params(
        ("station_id" = String, Path, description = "Station ID")
    ),
    responses(
        (status = 200, description = "Station found", body = StationStatus),
        (status = 404, description = "Station not found")
    )
)]
pub async fn get_station(
    State(state): State<ResourceState>,
    Path(station_id): Path<String>,
) -> ApiResult<StationStatus> {
    let station = state.provider.station(&station_id).await?
        .ok_or_else(|| GatewayError::not_found("Station", &station_id))?;

    Ok(Json(station))
}

/// Create stations router
pub fn stations_router(state: ResourceState, _config: &GatewayConfig) -> Result<Router> {
    Ok(Router::new()
        .route("/", get(list_stations))
        .route("/:station_id", get(get_station))
        .with_state(state))
}
