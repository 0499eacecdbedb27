//! API Gateway
//!
//! Composes the resource routers, dashboard pages, health check and API docs
//! into a single axum `Router`, and applies the cross-cutting layers.

use axum::{
    http::{HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use lkf_provider::DataProvider;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{api_doc, health, ApiError, ResourceState};
use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::routes::{RouteTable, API_MOUNTS};
use crate::static_content::StaticContent;

/// Build the gateway for the standard set of resource routers
pub fn build_gateway(config: &GatewayConfig, provider: Arc<dyn DataProvider>) -> Result<Router> {
    let table = RouteTable::new(&API_MOUNTS)?;
    build_gateway_with(config, provider, &table)
}

/// Build the gateway from an explicit route table
pub fn build_gateway_with(
    config: &GatewayConfig,
    provider: Arc<dyn DataProvider>,
    table: &RouteTable,
) -> Result<Router> {
    let cors = cors_layer(config)?;
    let state = ResourceState::new(provider);

    let router = Router::new().route("/health", get(health));
    let router = table.mount(router, &state, config)?;

    let content = StaticContent::new(config.content_root.clone());
    let router = router
        .merge(content.router())
        .merge(SwaggerUi::new("/docs").url("/openapi.json", api_doc(config)));

    info!(
        "Gateway ready: {} resource routers, content root {}",
        table.resolved().len(),
        content.root().display()
    );

    Ok(router
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

/// CORS policy: every method and header, credentials allowed.
///
/// With credentials a literal `*` is not permitted, so origin, methods and
/// headers are reflected from the request instead.
pub fn cors_layer(config: &GatewayConfig) -> Result<CorsLayer> {
    let origin = if config.allows_any_origin() {
        AllowOrigin::mirror_request()
    } else {
        let origins = config
            .allowed_origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o.trim())
                    .map_err(|_| GatewayError::configuration(format!("Invalid CORS origin: '{}'", o)))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

async fn not_found(uri: Uri) -> Response {
    let body = ApiError {
        error: "NOT_FOUND".to_string(),
        message: format!("No route for {}", uri.path()),
    };
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_any_origin() {
        assert!(cors_layer(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_cors_origin_list() {
        let config = GatewayConfig::default()
            .with_allowed_origins(["http://localhost:3000", "https://floods.example.lk"]);
        assert!(cors_layer(&config).is_ok());
    }

    #[test]
    fn test_cors_invalid_origin() {
        let config = GatewayConfig::default().with_allowed_origins(["http://bad\norigin"]);
        let err = cors_layer(&config).unwrap_err();
        assert!(matches!(err, GatewayError::Configuration { .. }));
    }
}
