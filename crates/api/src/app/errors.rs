//! Consistent JSON error responses.
//!
//! Access failures map to 401/403 with the guard's non-leaking message; the
//! audit metadata stays in logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use harborcms_auth::AccessError;
use harborcms_core::DomainError;

#[derive(Debug)]
pub enum ApiError {
    Access(AccessError),
    Domain(DomainError),
    BadRequest(String),
    Internal(String),
}

impl From<AccessError> for ApiError {
    fn from(value: AccessError) -> Self {
        ApiError::Access(value)
    }
}

impl From<DomainError> for ApiError {
    fn from(value: DomainError) -> Self {
        ApiError::Domain(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Access(e) => access_error_to_response(&e),
            ApiError::Domain(e) => domain_error_to_response(e),
            ApiError::BadRequest(msg) => json_error(StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal server error")
            }
        }
    }
}

pub fn access_error_to_response(err: &AccessError) -> Response {
    match err {
        AccessError::Unauthenticated => json_error(StatusCode::UNAUTHORIZED, "unauthorized", err.public_message()),
        AccessError::PermissionDenied { .. } => json_error(StatusCode::FORBIDDEN, "forbidden", err.public_message()),
    }
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
