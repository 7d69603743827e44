use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use storefront_products::{DEFAULT_PRICE_BAND, PRICE_BANDS};

use crate::app::dto::PriceBandsResponse;
use crate::app::services::AppServices;

/// Known categories, independent of any product query.
pub async fn list_categories(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    let snapshot = services.snapshot();
    (StatusCode::OK, Json(snapshot.categories.clone()))
}

/// Preset price filters plus the "all prices" band that clears them.
pub async fn list_price_bands() -> impl IntoResponse {
    let body = PriceBandsResponse {
        default: DEFAULT_PRICE_BAND,
        bands: PRICE_BANDS.to_vec(),
    };
    (StatusCode::OK, Json(body))
}
