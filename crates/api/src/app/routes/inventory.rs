use std::sync::Arc;

use axum::{
    Router,
    extract::Extension,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};

use scanstock_infra::product_store::csv_file;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/export", get(export_inventory))
}

/// Download the inventory in the datastore's CSV layout, unmanaged columns
/// included.
pub async fn export_inventory(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let records = match services.run_blocking(|store| store.list()).await {
        Ok(records) => records,
        Err(e) => return errors::join_error_to_response(e),
    };

    let mut body = Vec::new();
    if let Err(e) = csv_file::write_records(&mut body, &records) {
        return errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "export_error", e.to_string());
    }

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=inventory_export.csv",
            ),
        ],
        body,
    )
        .into_response()
}
