// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: One enum for every failure a request can surface
/// Each variant maps to appropriate HTTP status code and error response
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GuideError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Missing required fields: {0}")]
    MissingFields(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Service not configured: {0}")]
    ConfigurationError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl GuideError {
    /// Stable machine-readable code used in JSON error bodies
    pub fn code(&self) -> &'static str {
        match self {
            GuideError::NotFound(_) => "NOT_FOUND",
            GuideError::MissingFields(_) => "MISSING_FIELDS",
            GuideError::InvalidInput(_) => "INVALID_INPUT",
            GuideError::ValidationError(_) => "VALIDATION_ERROR",
            GuideError::DatabaseError(_) => "DATABASE_ERROR",
            GuideError::ExternalApiError(_) => "EXTERNAL_API_ERROR",
            GuideError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            GuideError::ConfigurationError(_) => "CONFIGURATION_ERROR",
            GuideError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// True for failures caused by the caller's request rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GuideError::MissingFields(_)
                | GuideError::InvalidInput(_)
                | GuideError::ValidationError(_)
        )
    }
}

/// Convert GuideError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for GuideError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            GuideError::NotFound(_) => StatusCode::NOT_FOUND,
            GuideError::MissingFields(_) => StatusCode::BAD_REQUEST,
            GuideError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            GuideError::ValidationError(_) => StatusCode::BAD_REQUEST,
            GuideError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GuideError::ExternalApiError(_) => StatusCode::BAD_GATEWAY,
            GuideError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            GuideError::ConfigurationError(_) => StatusCode::SERVICE_UNAVAILABLE,
            GuideError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
