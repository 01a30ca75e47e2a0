//! Error type returned by HTTP handlers
//!
//! Every variant renders as an error envelope. Storage and internal failures
//! are logged in full and reach the client only as a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use thiserror::Error;
use tracing::error;

use crate::shared::{DomainError, Envelope};

/// Machine-readable error codes carried in the envelope
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const CONFLICT: &str = "CONFLICT";
    pub const SERVICE_UNAVAILABLE: &str = "SERVICE_UNAVAILABLE";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request (bad JSON, bad path parameter)
    #[error("{0}")]
    BadRequest(String),

    /// Well-formed request that failed validation
    #[error("{message}")]
    Unprocessable {
        message: String,
        details: Option<Value>,
    },

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) | ApiError::Unprocessable { .. } => codes::VALIDATION_ERROR,
            ApiError::Unauthorized(_) => codes::UNAUTHORIZED,
            ApiError::Forbidden(_) => codes::FORBIDDEN,
            ApiError::NotFound(_) => codes::NOT_FOUND,
            ApiError::Conflict(_) => codes::CONFLICT,
            ApiError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    pub fn into_envelope(self) -> Envelope<()> {
        let code = self.code();
        match self {
            ApiError::Unprocessable { message, details } => Envelope::fail(code, message, details),
            ApiError::Internal(_) => Envelope::fail(code, "Internal server error", None),
            other => Envelope::fail(code, other.to_string(), None),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            DomainError::Validation(message) => ApiError::Unprocessable {
                message,
                details: None,
            },
            DomainError::Conflict(message) => ApiError::Conflict(message),
            DomainError::Unauthorized(message) => ApiError::Unauthorized(message),
            DomainError::Forbidden(message) => ApiError::Forbidden(message),
            DomainError::Storage(message) => ApiError::Internal(format!("storage: {}", message)),
            DomainError::Internal(message) => ApiError::Internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref detail) = self {
            error!(error = %detail, "Request failed with internal error");
        }
        let status = self.status();
        (status, self.into_envelope()).into_response()
    }
}
