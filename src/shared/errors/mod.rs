//! Error Types
//!
//! Proxy error types with proper HTTP status code mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Errors raised while forwarding a request to the upstream service
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The upstream answered with a non-success status
    #[error("Upstream responded with {status_code}: {message}")]
    Upstream { status_code: u16, message: String },

    /// DNS failure, refused connection, TLS failure or broken transport
    #[error("Upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    #[error("Upstream did not respond in time")]
    UpstreamTimeout,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ProxyError {
    /// Get the HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Upstream { status_code, .. } => {
                StatusCode::from_u16(*status_code).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::UpstreamUnreachable(_) => StatusCode::BAD_GATEWAY,
            Self::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Upstream { .. } => "UPSTREAM_ERROR",
            Self::UpstreamUnreachable(_) => "UPSTREAM_UNREACHABLE",
            Self::UpstreamTimeout => "UPSTREAM_TIMEOUT",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Message exposed to the caller
    ///
    /// Upstream messages are relayed as-is; internal details of transport
    /// and configuration failures are not.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Upstream { message, .. } => message.clone(),
            Self::UpstreamUnreachable(_) => "Upstream service is unreachable".to_string(),
            Self::UpstreamTimeout => "Upstream service did not respond in time".to_string(),
            Self::Unauthorized(msg) | Self::BadRequest(msg) => msg.clone(),
            Self::Configuration(_) => "Gateway is misconfigured".to_string(),
        }
    }
}

/// API error response for HTTP responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Proxy(#[from] ProxyError),

    #[error("Resource not found: {0}")]
    NotFound(String),
}

/// Error response body structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    pub timestamp: String,
}

/// Error detail structure
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    /// Build an error body stamped with the current time
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Proxy(err) => {
                if err.status_code().is_server_error() {
                    tracing::warn!(error = %err, "Proxy request failed");
                }
                (err.status_code(), err.error_code(), err.public_message())
            }
            ApiError::NotFound(path) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("No route for {path}"),
            ),
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}
