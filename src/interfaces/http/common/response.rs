//! `IntoResponse` for the envelope

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use super::api_error::codes;
use crate::shared::Envelope;

/// HTTP status implied by an error code. `VALIDATION_ERROR` defaults to 400;
/// callers that mean 422 set the status explicitly.
pub fn status_for_code(code: &str) -> StatusCode {
    match code {
        codes::VALIDATION_ERROR => StatusCode::BAD_REQUEST,
        codes::UNAUTHORIZED => StatusCode::UNAUTHORIZED,
        codes::FORBIDDEN => StatusCode::FORBIDDEN,
        codes::NOT_FOUND => StatusCode::NOT_FOUND,
        codes::CONFLICT => StatusCode::CONFLICT,
        codes::SERVICE_UNAVAILABLE => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = match &self {
            Envelope::Error(body) => status_for_code(&body.code),
            Envelope::Success(_) | Envelope::Paginated(_) => StatusCode::OK,
        };
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_200() {
        let resp = Envelope::ok("hi").into_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn error_status_follows_code() {
        let cases = [
            ("NOT_FOUND", StatusCode::NOT_FOUND),
            ("CONFLICT", StatusCode::CONFLICT),
            ("UNAUTHORIZED", StatusCode::UNAUTHORIZED),
            ("FORBIDDEN", StatusCode::FORBIDDEN),
            ("VALIDATION_ERROR", StatusCode::BAD_REQUEST),
            ("SERVICE_UNAVAILABLE", StatusCode::SERVICE_UNAVAILABLE),
            ("SOMETHING_ELSE", StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (code, status) in cases {
            let resp = Envelope::<()>::fail(code, "x", None).into_response();
            assert_eq!(resp.status(), status, "{code}");
        }
    }

    #[test]
    fn explicit_status_wins() {
        let resp = (StatusCode::CREATED, Envelope::ok(1)).into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
}
