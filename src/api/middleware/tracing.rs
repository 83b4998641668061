//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Span-per-request tracing for every route.
///
/// Requests open an `INFO` span carrying method, URI and version; responses
/// are logged at `INFO` with status and latency in milliseconds. 5xx responses
/// are additionally reported as failures.
///
/// ```text
/// INFO request{method=POST uri=/shorten_url version=HTTP/1.1}: finished processing request latency=3 ms status=200
/// INFO request{method=GET uri=/dr version=HTTP/1.1}: finished processing request latency=1 ms status=302
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
