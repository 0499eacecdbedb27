//! Flood Alerts API

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use lkf_common::{AlertSummary, FloodAlert};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::common::{filter_eq, parse_alert_level, ApiQuery, ApiResult, ResourceState};
use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};

/// Query parameters for alerts list
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AlertsQuery {
    /// Filter by station ID
    pub station: Option<String>,

    /// Filter by severity: warning, danger, critical
    pub severity: Option<String>,

    /// Filter by district
    pub district: Option<String>,
}

/// List active flood alerts, most severe first
#[utoipa::path(
    get,
    path = "/api/alerts",
    tag = "Alerts",
    params(AlertsQuery),
    responses(
        (status = 200, description = "Active alerts", body = [FloodAlert]),
        (status = 400, description = "Invalid severity"),
        (status = 502, description = "Data provider unavailable")
    )
)]
pub async fn list_alerts(
    State(state): State<ResourceState>,
    ApiQuery(query): ApiQuery<AlertsQuery>,
) -> ApiResult<Vec<FloodAlert>> {
    let severity = parse_alert_level("severity", query.severity.as_deref())?;

    let alerts = state.provider.alerts().await?
        .into_iter()
        .filter(|a| filter_eq(query.station.as_deref(), &a.station_id))
        .filter(|a| filter_eq(query.district.as_deref(), &a.district))
        .filter(|a| severity.map_or(true, |s| a.alert_type == s))
        .collect();

    Ok(Json(alerts))
}

/// Alert counts for the dashboard header
#[utoipa::path(
    get,
    path = "/api/alerts/summary",
    tag = "Alerts",
    responses(
        (status = 200, description = "Alert summary", body = AlertSummary)
    )
)]
pub async fn alert_summary(State(state): State<ResourceState>) -> ApiResult<AlertSummary> {
    let alerts = state.provider.alerts().await?;
    Ok(Json(AlertSummary::from_alerts(&alerts)))
}

/// Get alert by ID
#[utoipa::path(
    get,
    path = "/api/alerts/{alert_id}",
    tag = "Alerts",
    params(
        ("alert_id" = String, Path, description = "Alert ID")
    ),
    responses(
        (status = 200, description = "Alert found", body = FloodAlert),
        (status = 404, description = "Alert not found")
    )
)]
pub async fn get_alert(
    State(state): State<ResourceState>,
    Path(alert_id): Path<String>,
) -> ApiResult<FloodAlert> {
    let alert = state.provider.alert(&alert_id).await?
        .ok_or_else(|| GatewayError::not_found("Alert", &alert_id))?;

    Ok(Json(alert))
}

/// Create alerts router
pub fn alerts_router(state: ResourceState, _config: &GatewayConfig) -> Result<Router> {
    Ok(Router::new()
        .route("/", get(list_alerts))
        .route("/summary", get(alert_summary))
        .route("/:alert_id", get(get_alert))
        .with_state(state))
}
