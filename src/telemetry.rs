use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, Response},
};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::TraceLayer,
};
use tracing::Span;
use uuid::Uuid;

const DEFAULT_FILTER: &str = "film_like_api_rust=debug,tower_http=info,info";

pub type LikeTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    fn(&Request<Body>) -> Span,
    fn(&Request<Body>, &Span),
    fn(&Response<Body>, Duration, &Span),
>;

pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}

/// Request span carrying a fresh request id, plus one completion event whose
/// level follows the response class.
pub fn trace_layer() -> LikeTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(like_request_span as fn(&Request<Body>) -> Span)
        .on_request(log_request as fn(&Request<Body>, &Span))
        .on_response(log_response as fn(&Response<Body>, Duration, &Span))
}

fn like_request_span(request: &Request<Body>) -> Span {
    let authenticated = request.headers().contains_key(header::AUTHORIZATION);

    tracing::info_span!(
        "like_request",
        request_id = %Uuid::new_v4(),
        method = %request.method(),
        path = %request.uri().path(),
        authenticated,
    )
}

fn log_request(_request: &Request<Body>, _span: &Span) {
    tracing::debug!("request started");
}

fn log_response(response: &Response<Body>, latency: Duration, _span: &Span) {
    let status = response.status().as_u16();
    let latency_ms = latency.as_millis() as u64;

    if response.status().is_server_error() {
        tracing::error!(status, latency_ms, "request failed");
    } else if response.status().is_client_error() {
        tracing::warn!(status, latency_ms, "request rejected");
    } else {
        tracing::info!(status, latency_ms, "request completed");
    }
}
