use axum::{
    Json, Router,
    extract::{Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/barcode", post(encode_barcode))
        .route("/barcode/:codigo", get(decode_barcode))
}

pub async fn decode_barcode(Path(codigo): Path<String>) -> axum::response::Response {
    match scanstock_barcode::decode(codigo.trim()) {
        Ok(decoded) => (StatusCode::OK, Json(dto::decoded_to_json(&decoded))).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

/// Generate a custom barcode from its three segments.
pub async fn encode_barcode(
    body: Result<Json<dto::EncodeBarcodeRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rej) => return errors::json_rejection_to_response(rej),
    };

    let codigo = match scanstock_barcode::encode(
        body.pais.trim(),
        body.producto.trim(),
        body.proveedor.trim(),
    ) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    match scanstock_barcode::decode(&codigo) {
        Ok(decoded) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "codigo": codigo,
                "decoded": dto::decoded_to_json(&decoded),
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}
