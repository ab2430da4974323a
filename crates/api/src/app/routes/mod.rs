use axum::{Router, routing::get};

pub mod barcode;
pub mod catalog;
pub mod inventory;
pub mod products;
pub mod system;

/// Router for every endpoint.
pub fn router() -> Router {
    let api = Router::new()
        .merge(products::router())
        .merge(barcode::router())
        .route("/catalog", get(catalog::get_catalog));

    Router::new()
        .route("/health", get(system::health))
        .nest("/api", api)
        .nest("/inventory", inventory::router())
}
