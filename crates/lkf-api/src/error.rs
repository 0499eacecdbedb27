//! Gateway Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lkf_provider::ProviderError;
use thiserror::Error;
use tracing::{error, warn};

use crate::api::common::ApiError;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Data provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl GatewayError {
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::NotFound { .. } => StatusCode::NOT_FOUND,
            GatewayError::Validation { .. } => StatusCode::BAD_REQUEST,
            GatewayError::Provider(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            GatewayError::NotFound { .. } => "NOT_FOUND",
            GatewayError::Validation { .. } => "VALIDATION_ERROR",
            GatewayError::Provider(_) => "UPSTREAM_ERROR",
            GatewayError::Configuration { .. } => "CONFIGURATION_ERROR",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            GatewayError::Provider(e) => warn!("Data provider failure: {}", e),
            GatewayError::Configuration { .. } => error!("{}", self),
            _ => {}
        }

        let body = ApiError {
            error: self.code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(GatewayError::not_found("Station", "x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(GatewayError::validation("bad").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            GatewayError::from(ProviderError::Configuration("down".to_string())).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            GatewayError::configuration("bad window").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = GatewayError::not_found("Station", "hanwella");
        assert_eq!(err.to_string(), "Entity not found: Station with id hanwella");
    }
}
