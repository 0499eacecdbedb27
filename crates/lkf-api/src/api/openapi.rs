//! OpenAPI Documentation
//!
//! Central OpenAPI specification for the flood data API. `GET /` is left out;
//! `/dashboard` is the documented entry point for the UI.

use utoipa::OpenApi;

use crate::config::GatewayConfig;

/// Flood Data API OpenAPI Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sri Lanka Flood Data API",
        version = "1.0.0",
        description = "REST API for Sri Lanka river water level and flood monitoring data",
        contact(
            name = "Sri Lanka Flood Dashboard",
            url = "https://github.com/RensithUdara/SriLankan-Flood-Dashboard"
        ),
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    tags(
        (name = "Stations", description = "Gauging stations"),
        (name = "Rivers", description = "Rivers grouped from the station registry"),
        (name = "Basins", description = "River basins"),
        (name = "Water Levels", description = "Latest levels and reading history"),
        (name = "Alerts", description = "Flood alerts derived from thresholds"),
        (name = "Dashboard", description = "Dashboard pages"),
        (name = "Health", description = "Liveness")
    ),
    paths(
        // Stations
        super::stations::list_stations,
        super::stations::get_station,
        // Rivers
        super::rivers::list_rivers,
        super::rivers::get_river,
        super::rivers::get_river_stations,
        // Basins
        super::basins::list_basins,
        super::basins::get_basin,
        super::basins::get_basin_rivers,
        // Water Levels
        super::levels::list_levels,
        super::levels::get_level,
        super::levels::get_trend,
        // Alerts
        super::alerts::list_alerts,
        super::alerts::alert_summary,
        super::alerts::get_alert,
        // Pages
        crate::static_content::dashboard,
        crate::static_content::demo_stations,
        super::health::health,
    ),
    components(
        schemas(
            lkf_common::AlertLevel,
            lkf_common::Trend,
            lkf_common::Thresholds,
            lkf_common::Station,
            lkf_common::StationStatus,
            lkf_common::River,
            lkf_common::Basin,
            lkf_common::WaterLevel,
            lkf_common::Reading,
            lkf_common::FloodAlert,
            lkf_common::AlertSummary,
            super::health::HealthResponse,
            super::common::ApiError,
        )
    )
)]
pub struct ApiDoc;

/// Build the document with service metadata taken from the gateway config
pub fn api_doc(config: &GatewayConfig) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = config.title.clone();
    doc.info.version = config.version.clone();
    doc.info.description = Some(config.description.clone());
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_undocumented() {
        let doc = ApiDoc::openapi();
        assert!(!doc.paths.paths.contains_key("/"));
        assert!(doc.paths.paths.contains_key("/dashboard"));
        assert!(doc.paths.paths.contains_key("/health"));
    }

    #[test]
    fn test_info_from_config() {
        let config = GatewayConfig {
            title: "Flood API".to_string(),
            version: "9.9.9".to_string(),
            ..GatewayConfig::default()
        };
        let doc = api_doc(&config);
        assert_eq!(doc.info.title, "Flood API");
        assert_eq!(doc.info.version, "9.9.9");
        assert_eq!(doc.info.license.map(|l| l.name), Some("MIT".to_string()));
    }
}
