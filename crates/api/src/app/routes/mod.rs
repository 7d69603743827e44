use axum::{routing::get, Router};

pub mod catalog;
pub mod products;
pub mod system;

/// Router for all catalog endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/categories", get(catalog::list_categories))
        .route("/price-bands", get(catalog::list_price_bands))
        .nest("/products", products::router())
}
