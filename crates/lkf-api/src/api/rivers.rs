//! Rivers API

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use lkf_common::{River, StationStatus};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::common::{filter_eq, ApiQuery, ApiResult, ResourceState};
use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};

/// Query parameters for rivers list
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RiversQuery {
    /// Filter by basin name
    pub basin: Option<String>,
}

/// List rivers
#[utoipa::path(
    get,
    path = "/api/rivers",
    tag = "Rivers",
    params(RiversQuery),
    responses(
        (status = 200, description = "Rivers with aggregated alert level", body = [River]),
        (status = 502, description = "Data provider unavailable")
    )
)]
pub async fn list_rivers(
    State(state): State<ResourceState>,
    ApiQuery(query): ApiQuery<RiversQuery>,
) -> ApiResult<Vec<River>> {
    let rivers = state.provider.rivers().await?
        .into_iter()
        .filter(|r| filter_eq(query.basin.as_deref(), &r.basin))
        .collect();

    Ok(Json(rivers))
}

/// Get river by ID
#[utoipa::path(
    get,
    path = "/api/rivers/{river_id}",
    tag = "Rivers",
    params(
        ("river_id" = String, Path, description = "River ID (slug of the river name)")
    ),
    responses(
        (status = 200, description = "River found", body = River),
        (status = 404, description = "River not found")
    )
)]
pub async fn get_river(
    State(state): State<ResourceState>,
    Path(river_id): Path<String>,
) -> ApiResult<River> {
    let river = state.provider.river(&river_id).await?
        .ok_or_else(|| GatewayError::not_found("River", &river_id))?;

    Ok(Json(river))
}

/// List the stations on a river
#[utoipa::path(
    get,
    path = "/api/rivers/{river_id}/stations",
    tag = "Rivers",
    params(
        ("river_id" = String, Path, description = "River ID (slug of the river name)")
    ),
    responses(
        (status = 200, description = "Stations on the river", body = [StationStatus]),
        (status = 404, description = "River not found")
    )
)]
pub async fn get_river_stations(
    State(state): State<ResourceState>,
    Path(river_id): Path<String>,
) -> ApiResult<Vec<StationStatus>> {
    let stations = state.provider.river_stations(&river_id).await?
        .ok_or_else(|| GatewayError::not_found("River", &river_id))?;

    Ok(Json(stations))
}

/// Create rivers router
pub fn rivers_router(state: ResourceState, _config: &GatewayConfig) -> Result<Router> {
    Ok(Router::new()
        .route("/", get(list_rivers))
        .route("/:river_id", get(get_river))
        .route("/:river_id/stations", get(get_river_stations))
        .with_state(state))
}
