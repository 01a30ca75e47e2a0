//! Standard response envelope.
//!
//! Every REST endpoint answers with exactly one of three shapes:
//!
//! - `{"success": true,  "code": "OK", "data": {...}}`
//! - `{"success": true,  "code": "OK", "data": [...], "meta": {...}}`
//! - `{"success": false, "code": "...", "message": "...", "details": {...}}`
//!
//! `success` is carried by [`Flag`], a const-generic marker that serializes
//! as a JSON boolean and refuses to deserialize the opposite value, so a
//! decoded [`Envelope`] can never pair `success: false` with data.

use std::fmt;

use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

use super::pagination::PaginationMeta;

/// Code carried by both success shapes.
pub const OK_CODE: &str = "OK";

/// JSON boolean fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flag<const VALUE: bool>;

impl<const VALUE: bool> Serialize for Flag<VALUE> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(VALUE)
    }
}

impl<'de, const VALUE: bool> Deserialize<'de> for Flag<VALUE> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = bool::deserialize(deserializer)?;
        if value == VALUE {
            Ok(Flag)
        } else {
            let expected = if VALUE { "true" } else { "false" };
            Err(de::Error::invalid_value(Unexpected::Bool(value), &expected))
        }
    }
}

/// Single-item success body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SuccessBody<T> {
    #[schema(value_type = bool, example = true)]
    pub success: Flag<true>,
    #[schema(example = "OK")]
    pub code: String,
    pub data: T,
}

/// List success body with pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedBody<T> {
    #[schema(value_type = bool, example = true)]
    pub success: Flag<true>,
    #[schema(example = "OK")]
    pub code: String,
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Failure body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[schema(value_type = bool, example = false)]
    pub success: Flag<false>,
    /// Machine-readable error code, e.g. `NOT_FOUND`
    #[schema(example = "NOT_FOUND")]
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Optional structured details (field errors, health report, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

/// Response envelope. Built once per request and serialized as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    // Paginated must be tried before Success when decoding: a paginated
    // body is also a structurally valid Success body for `T = Vec<_>`.
    Paginated(PaginatedBody<T>),
    Success(SuccessBody<T>),
    Error(ErrorBody),
}

impl<T> Envelope<T> {
    /// `{success: true, code: "OK", data}`
    pub fn ok(data: T) -> Self {
        Envelope::Success(SuccessBody {
            success: Flag,
            code: OK_CODE.to_string(),
            data,
        })
    }

    /// `{success: true, code: "OK", data: [...], meta}`
    pub fn paginated(data: Vec<T>, meta: PaginationMeta) -> Self {
        Envelope::Paginated(PaginatedBody {
            success: Flag,
            code: OK_CODE.to_string(),
            data,
            meta,
        })
    }

    /// `{success: false, code, message, details?}`
    pub fn fail(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<serde_json::Value>,
    ) -> Self {
        Envelope::Error(ErrorBody {
            success: Flag,
            code: code.into(),
            message: message.into(),
            details,
        })
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, Envelope::Error(_))
    }

    pub fn code(&self) -> &str {
        match self {
            Envelope::Success(body) => &body.code,
            Envelope::Paginated(body) => &body.code,
            Envelope::Error(body) => &body.code,
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}
