// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Assigns x-request-id values and opens one span per HTTP request

use axum::body::Body;
use http::header::HeaderName;
use http::Request;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tracing::field::Empty;
use tracing::{info_span, Span};

/// Header carrying the request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

fn request_id_header() -> HeaderName {
    HeaderName::from_static(REQUEST_ID_HEADER)
}

/// Layer that assigns a UUID v4 `x-request-id` when the client sent none
#[must_use]
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(request_id_header(), MakeRequestUuid)
}

/// Layer that copies the request's `x-request-id` onto the response
#[must_use]
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(request_id_header())
}

/// Span for one HTTP request, keyed by its request id
///
/// `admin_email` is recorded later by the admin guard.
pub fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
        admin_email = Empty,
    )
}
