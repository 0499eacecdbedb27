//! Basins API

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use lkf_common::{Basin, River};

use crate::api::common::{ApiResult, ResourceState};
use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};

/// List river basins
#[utoipa::path(
    get,
    path = "/api/basins",
    tag = "Basins",
    responses(
        (status = 200, description = "River basins with aggregated alert level", body = [Basin]),
        (status = 502, description = "Data provider unavailable")
    )
)]
pub async fn list_basins(State(state): State<ResourceState>) -> ApiResult<Vec<Basin>> {
    Ok(Json(state.provider.basins().await?))
}

/// Get basin by ID
#[utoipa::path(
    get,
    path = "/api/basins/{basin_id}",
    tag = "Basins",
    params(
        ("basin_id" = String, Path, description = "Basin ID (slug of the basin name)")
    ),
    responses(
        (status = 200, description = "Basin found", body = Basin),
        (status = 404, description = "Basin not found")
    )
)]
pub async fn get_basin(
    State(state): State<ResourceState>,
    Path(basin_id): Path<String>,
) -> ApiResult<Basin> {
    let basin = state.provider.basin(&basin_id).await?
        .ok_or_else(|| GatewayError::not_found("Basin", &basin_id))?;

    Ok(Json(basin))
}

/// List the rivers in a basin
#[utoipa::path(
    get,
    path = "/api/basins/{basin_id}/rivers",
    tag = "Basins",
    params(
        ("basin_id" = String, Path, description = "Basin ID (slug of the basin name)")
    ),
    responses(
        (status = 200, description = "Rivers in the basin", body = [River]),
        (status = 404, description = "Basin not found")
    )
)]
pub async fn get_basin_rivers(
    State(state): State<ResourceState>,
    Path(basin_id): Path<String>,
) -> ApiResult<Vec<River>> {
    let rivers = state.provider.basin_rivers(&basin_id).await?
        .ok_or_else(|| GatewayError::not_found("Basin", &basin_id))?;

    Ok(Json(rivers))
}

/// Create basins router
pub fn basins_router(state: ResourceState, _config: &GatewayConfig) -> Result<Router> {
    Ok(Router::new()
        .route("/", get(list_basins))
        .route("/:basin_id", get(get_basin))
        .route("/:basin_id/rivers", get(get_basin_rivers))
        .with_state(state))
}
