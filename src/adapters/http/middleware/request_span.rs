//! Request tracing span.

use axum::body::Body;
use axum::http::Request;
use tracing::Span;

/// Span for `TraceLayer::make_span_with`.
///
/// Must run inside `SetRequestIdLayer` so the `x-request-id` header is
/// already present.
pub fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
