//! HTTP request/response tracing middleware.

use axum::body::Body;
use axum::http::{Request, Response};
use std::time::Duration;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnRequest, TraceLayer};
use tracing::{Span, field};

type MakeRequestSpan = fn(&Request<Body>) -> Span;
type OnRequestFinished = fn(&Response<Body>, Duration, &Span);

/// Request tracing layer used by the router.
pub type RequestTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    MakeRequestSpan,
    DefaultOnRequest,
    OnRequestFinished,
>;

/// Creates a tracing middleware for HTTP requests.
///
/// Each request gets an `INFO` span carrying the method and path. The query
/// string is left out. Once the response is ready the span records its
/// status and one event reports the latency:
///
/// ```text
/// INFO request{method=GET path=/abc123 status=302}: request finished latency_ms=0
/// ```
pub fn layer() -> RequestTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(request_span as MakeRequestSpan)
        .on_response(request_finished as OnRequestFinished)
}

fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        status = field::Empty,
    )
}

fn request_finished(response: &Response<Body>, latency: Duration, span: &Span) {
    let status = response.status().as_u16();
    span.record("status", status);

    if response.status().is_server_error() {
        tracing::warn!(parent: span, latency_ms = latency.as_millis() as u64, "request failed");
    } else {
        tracing::info!(parent: span, latency_ms = latency.as_millis() as u64, "request finished");
    }
}
