use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::services::FacilityError;

#[derive(Debug)]
pub enum ApiError {
    ConfigurationError(String),

    ServiceUnavailable(String),

    DatabaseError(String),

    ValidationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::ConfigurationError(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The facility database is not configured".to_string(),
                )
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::warn!("Facility database unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "The facility database is unreachable, please try again".to_string(),
                )
            }
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = ApiResponse::<()>::error(error_message);
        (status, Json(body)).into_response()
    }
}

impl From<FacilityError> for ApiError {
    fn from(err: FacilityError) -> Self {
        match err {
            FacilityError::Configuration(msg) => ApiError::ConfigurationError(msg),
            FacilityError::Connection(msg) => ApiError::ServiceUnavailable(msg),
            FacilityError::QueryExecution(msg) => ApiError::DatabaseError(msg),
        }
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }
}
