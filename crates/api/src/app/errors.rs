use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use storefront_core::CatalogError;

pub fn catalog_error_to_response(err: CatalogError) -> axum::response::Response {
    match err {
        CatalogError::InvalidParams(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_params", msg),
        CatalogError::Load(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "catalog_unavailable", msg)
        }
        CatalogError::TransientIo(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "catalog_io", msg)
        }
    }
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
