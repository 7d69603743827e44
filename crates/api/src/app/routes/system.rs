use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::{dto::HealthResponse, services::AppServices};

pub async fn health(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    let snapshot = services.snapshot();
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            catalog_version: snapshot.version,
            products: snapshot.products.len(),
            loaded_at: snapshot.loaded_at,
        }),
    )
}
