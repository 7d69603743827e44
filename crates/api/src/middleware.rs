use axum::{
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

use crate::context::RequestContext;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

const MAX_REQUEST_ID_LEN: usize = 128;

/// Attach a request id (propagated or generated) to the request, its tracing
/// span, and the response.
pub async fn request_id_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let ctx = extract_request_id(req.headers())
        .map(RequestContext::new)
        .unwrap_or_else(RequestContext::generate);

    let span = tracing::info_span!(
        "request",
        request_id = %ctx.request_id(),
        method = %req.method(),
        path = %req.uri().path(),
    );

    req.extensions_mut().insert(ctx.clone());

    let mut res = next.run(req).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(ctx.request_id()) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    res
}

fn extract_request_id(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(&REQUEST_ID_HEADER)?.to_str().ok()?.trim();

    let valid = !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|b| b.is_ascii_graphic());
    valid.then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn propagates_well_formed_ids() {
        let headers = headers_with("abc-123");
        assert_eq!(extract_request_id(&headers), Some("abc-123"));
    }

    #[test]
    fn ignores_missing_or_odd_ids() {
        assert_eq!(extract_request_id(&HeaderMap::new()), None);
        assert_eq!(extract_request_id(&headers_with("   ")), None);
        assert_eq!(extract_request_id(&headers_with("has space")), None);
        assert_eq!(extract_request_id(&headers_with(&"x".repeat(200))), None);
    }

    #[test]
    fn generated_ids_are_valid_header_values() {
        let ctx = RequestContext::generate();
        assert!(HeaderValue::from_str(ctx.request_id()).is_ok());
        assert_eq!(ctx.request_id().len(), 36);
    }
}
