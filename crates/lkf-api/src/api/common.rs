//! Common API types and utilities

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    Json,
};
use lkf_common::AlertLevel;
use lkf_provider::DataProvider;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::GatewayError;

/// Standard API error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    pub error: String,
    pub message: String,
}

pub type ApiResult<T> = Result<Json<T>, GatewayError>;

/// State shared by the resource routers
#[derive(Clone)]
pub struct ResourceState {
    pub provider: Arc<dyn DataProvider>,
}

impl ResourceState {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self { provider }
    }
}

/// Query string extractor whose rejection is a JSON `VALIDATION_ERROR`
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| GatewayError::validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Case-insensitive equality for optional query filters; `None` matches all
pub(crate) fn filter_eq(filter: Option<&str>, value: &str) -> bool {
    filter.map_or(true, |f| f.trim().eq_ignore_ascii_case(value))
}

/// Parse an optional alert level query parameter
pub(crate) fn parse_alert_level(param: &str, value: Option<&str>) -> Result<Option<AlertLevel>, GatewayError> {
    value
        .map(|v| {
            v.parse::<AlertLevel>()
                .map_err(|_| GatewayError::validation(format!("Invalid {}: {}", param, v)))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_eq() {
        assert!(filter_eq(None, "Colombo"));
        assert!(filter_eq(Some("colombo"), "Colombo"));
        assert!(filter_eq(Some(" COLOMBO "), "Colombo"));
        assert!(!filter_eq(Some("Galle"), "Colombo"));
    }

    #[test]
    fn test_parse_alert_level() {
        assert_eq!(parse_alert_level("severity", None).unwrap(), None);
        assert_eq!(
            parse_alert_level("severity", Some("Danger")).unwrap(),
            Some(AlertLevel::Danger)
        );
        let err = parse_alert_level("severity", Some("flooded")).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Invalid severity: flooded");
    }
}
