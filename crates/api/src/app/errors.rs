use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use scanstock_core::DomainError;
use scanstock_infra::StoreError;

pub fn domain_error_to_response(err: &DomainError) -> axum::response::Response {
    match err {
        DomainError::InvalidFormat(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_format", err.to_string())
        }
        DomainError::InvalidSegment(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_segment", err.to_string())
        }
        DomainError::Validation(_) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", err.to_string())
        }
        DomainError::DuplicateKey(_) => json_error(StatusCode::CONFLICT, "duplicate_key", err.to_string()),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Domain(e) => domain_error_to_response(&e),
        other => {
            tracing::error!(error = %other, "datastore failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", other.to_string())
        }
    }
}

/// A store call on the blocking pool panicked or was cancelled.
pub fn join_error_to_response(err: tokio::task::JoinError) -> axum::response::Response {
    tracing::error!(error = %err, "blocking store task failed");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "store task failed")
}

/// Malformed or mistyped JSON bodies are client errors.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
