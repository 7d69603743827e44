use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::RequestContext;

pub fn router() -> Router {
    Router::new().route("/", get(list_products))
}

/// `GET /products`: search, filter, sort and paginate the catalog.
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> axum::response::Response {
    let Query(pairs) = match query {
        Ok(q) => q,
        Err(e) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_params", e.body_text());
        }
    };

    let params = match dto::ListProductsQuery::from_pairs(pairs)
        .and_then(|q| q.into_params(services.page_limits()))
    {
        Ok(p) => p,
        Err(e) => {
            tracing::debug!(request_id = ctx.request_id(), error = %e, "rejected product query");
            return errors::catalog_error_to_response(e);
        }
    };

    let page = services.query_products(&params);
    tracing::debug!(
        request_id = ctx.request_id(),
        categories = params.categories.len(),
        total = page.total_matched,
        returned = page.items.len(),
        sort = params.sort.as_str(),
        "product query served"
    );

    (StatusCode::OK, Json(dto::ProductListResponse::from(page))).into_response()
}
