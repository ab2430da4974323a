use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// `/product/relink` is matched before `/product/:codigo`, so any other
/// method on it answers 405 rather than a barcode lookup.
pub fn router() -> Router {
    Router::new()
        .route("/product", post(create_product))
        .route("/product/relink", post(relink_product))
        .route(
            "/product/:codigo",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/products", get(list_products))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rej) => return errors::json_rejection_to_response(rej),
    };

    let codigo = body.codigo.trim().to_string();
    let fields = body.fields.into_fields();
    match services
        .run_blocking(move |store| store.create(&codigo, fields))
        .await
    {
        Ok(Ok(record)) => (StatusCode::CREATED, Json(record)).into_response(),
        Ok(Err(e)) => errors::store_error_to_response(e),
        Err(e) => errors::join_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(codigo): Path<String>,
) -> axum::response::Response {
    match services.run_blocking(move |store| store.get(&codigo)).await {
        Ok(Ok(record)) => (StatusCode::OK, Json(dto::ProductDetail::new(&record))).into_response(),
        Ok(Err(e)) => errors::store_error_to_response(e),
        Err(e) => errors::join_error_to_response(e),
    }
}

/// Replace every mutable field; the barcode in the path is the immutable key.
pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(codigo): Path<String>,
    body: Result<Json<dto::ProductFieldsRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rej) => return errors::json_rejection_to_response(rej),
    };

    let fields = body.into_fields();
    match services
        .run_blocking(move |store| store.update(&codigo, fields))
        .await
    {
        Ok(Ok(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(Err(e)) => errors::store_error_to_response(e),
        Err(e) => errors::join_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(codigo): Path<String>,
) -> axum::response::Response {
    match services.run_blocking(move |store| store.delete(&codigo)).await {
        Ok(Ok(())) => StatusCode::NO_CONTENT.into_response(),
        Ok(Err(e)) => errors::store_error_to_response(e),
        Err(e) => errors::join_error_to_response(e),
    }
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.run_blocking(|store| store.list()).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => errors::join_error_to_response(e),
    }
}

/// Move an existing product to a new barcode.
pub async fn relink_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::RelinkProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rej) => return errors::json_rejection_to_response(rej),
    };

    let old_code = body.old_code.trim().to_string();
    let new_code = body.new_code.trim().to_string();
    if old_code.is_empty() || new_code.is_empty() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "old_code and new_code are required",
        );
    }

    let (old, new) = (old_code.clone(), new_code.clone());
    match services
        .run_blocking(move |store| store.relink(&old, &new))
        .await
    {
        Ok(Ok(record)) => (
            StatusCode::OK,
            Json(dto::RelinkResponse {
                old_code: &old_code,
                new_code: &new_code,
                product: &record,
            }),
        )
            .into_response(),
        Ok(Err(e)) => errors::store_error_to_response(e),
        Err(e) => errors::join_error_to_response(e),
    }
}
