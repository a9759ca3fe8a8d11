//! Error handling and HTTP error conversion
//!
//! Domain errors from `pr_checker_core` and `auth_handler` are converted to HTTP
//! responses with a status code and a JSON [`ErrorResponse`]. A failing check is
//! never an error here; it is part of a successful response.
//!
//! | Error | Status |
//! |---|---|
//! | user authentication required | 401, sign-in URL in `details.loginUrl` |
//! | pull request or commit not found | 404 |
//! | source repository deleted | 409 |
//! | missing confirmation | 422 |
//! | bad webhook signature | 403 |
//! | GitHub or tracker failure | 502 |
//! | configuration | 500 |

use auth_handler::AuthError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pr_checker_core::CheckerError;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Standard error response for all API errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetails,
}

/// Error details structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Additional context (optional, type varies by error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Errors returned by the handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Checker(#[from] CheckerError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The request needs a user token. Carries the sign-in URL when OAuth is
    /// configured.
    #[error("Authentication required")]
    AuthenticationRequired { login_url: Option<String> },

    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("{0}")]
    BadRequest(String),

    #[error("Webhook signature does not match")]
    InvalidSignature,
}

impl ApiError {
    /// Create a validation error with field information
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Checker(err) => checker_status(err),
            Self::Auth(AuthError::InvalidCredentials) | Self::AuthenticationRequired { .. } => {
                StatusCode::UNAUTHORIZED
            }
            Self::Auth(AuthError::NotConfigured(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(AuthError::GitHubError(_)) => StatusCode::BAD_GATEWAY,
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) | Self::Auth(AuthError::InvalidState) => StatusCode::BAD_REQUEST,
            Self::InvalidSignature => StatusCode::FORBIDDEN,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Checker(CheckerError::AuthenticationRequired)
            | Self::Auth(AuthError::InvalidCredentials)
            | Self::AuthenticationRequired { .. } => "AuthenticationError",
            Self::Checker(err) if err.is_not_found() => "NotFound",
            Self::Checker(CheckerError::MissingHeadRepository) => "MissingHeadRepository",
            Self::Checker(CheckerError::Configuration { .. })
            | Self::Auth(AuthError::NotConfigured(_)) => "ConfigurationError",
            Self::Checker(_) | Self::Auth(AuthError::GitHubError(_)) => "UpstreamError",
            Self::Validation { .. } => "ValidationError",
            Self::BadRequest(_) => "BadRequest",
            Self::Auth(AuthError::InvalidState) => "InvalidState",
            Self::InvalidSignature => "InvalidSignature",
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::AuthenticationRequired {
                login_url: Some(url),
            } => Some(json!({ "loginUrl": url })),
            Self::Validation { field, .. } => Some(json!({ "field": field })),
            _ => None,
        }
    }

    fn message(&self, status: StatusCode) -> String {
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        }
    }
}

fn checker_status(err: &CheckerError) -> StatusCode {
    match err {
        CheckerError::AuthenticationRequired => StatusCode::UNAUTHORIZED,
        CheckerError::MissingHeadRepository => StatusCode::CONFLICT,
        CheckerError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        err if err.is_not_found() => StatusCode::NOT_FOUND,
        CheckerError::GitHub(_) | CheckerError::Tracker(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log error server-side
        log_error(&self, status);

        let error_response = ErrorResponse {
            error: ErrorDetails {
                code: self.code().to_string(),
                message: self.message(status),
                details: self.details(),
            },
        };

        (status, Json(error_response)).into_response()
    }
}

/// Log error with appropriate level based on HTTP status
fn log_error(error: &ApiError, status: StatusCode) {
    match status {
        StatusCode::INTERNAL_SERVER_ERROR | StatusCode::BAD_GATEWAY => {
            tracing::error!("API error: {} - {}", status, error);
        }
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => {
            tracing::warn!("API error: {} - {}", status, error);
        }
        _ => {
            tracing::info!("API error: {} - {}", status, error);
        }
    }
}
