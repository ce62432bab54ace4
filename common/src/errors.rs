use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Failures of the forecast pipeline
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration missing: {0}")]
    ConfigMissing(String),

    #[error("Weather provider unreachable: {0}")]
    ProviderUnreachable(#[from] reqwest::Error),

    #[error("Weather provider error: {status} - {message}")]
    ProviderError { status: u16, message: String },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Timeout error: {0}")]
    TimeoutError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    code: &'static str,
    error: String,
}

impl AppError {
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::ConfigMissing(message.into())
    }

    pub fn provider(status: u16, message: impl Into<String>) -> Self {
        Self::ProviderError {
            status,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedPayload(message.into())
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::TimeoutError(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    /// Stable machine-readable code for the error body
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ConfigMissing(_) => "config_missing",
            AppError::ProviderUnreachable(_) | AppError::TimeoutError(_) => "api_error",
            AppError::ProviderError { .. } | AppError::MalformedPayload(_) => "api_error",
            AppError::ValidationError(_) => "invalid_request",
            AppError::InternalError(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            code: self.code(),
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}
