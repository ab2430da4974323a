use axum::{Json, http::StatusCode, response::IntoResponse};

use crate::app::dto;

/// Country/supplier tables and categories for building custom barcodes.
pub async fn get_catalog() -> axum::response::Response {
    (StatusCode::OK, Json(dto::catalog_to_json())).into_response()
}
