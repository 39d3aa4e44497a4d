//! API Middleware
//!
//! Correlation ids and request logging.

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Header carrying the correlation id in both directions
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Correlation id of the current request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

// =========================================================================
// Correlation ID Middleware
// =========================================================================

/// Read `X-Correlation-Id` or generate a new one, store it in the request
/// extensions and echo it on the response
pub async fn correlation_id_middleware(mut request: Request<Body>, next: Next) -> Response {
    let correlation_id = request
        .headers()
        .get(CORRELATION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    request.extensions_mut().insert(CorrelationId(correlation_id));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&correlation_id.to_string()) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }

    response
}

// =========================================================================
// Request Logging Middleware
// =========================================================================

/// Request headers recorded in the logs. Anything not listed, credentials
/// included, never reaches a log line.
const LOGGED_HEADERS: &[&str] = &["content-type", "content-length", "origin", "user-agent"];

/// The subset of `headers` that is safe and useful to log
pub fn loggable_headers(headers: &HeaderMap) -> Vec<(&'static str, &str)> {
    LOGGED_HEADERS
        .iter()
        .filter_map(|name| {
            let value = headers.get(*name)?.to_str().ok()?;
            Some((*name, value))
        })
        .collect()
}

/// Wrap each todo request in a `todo_request` span carrying the method,
/// path and correlation id, and log its outcome
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let correlation_id = request
        .extensions()
        .get::<CorrelationId>()
        .map(|id| id.0.to_string())
        .unwrap_or_default();

    let span = tracing::info_span!(
        "todo_request",
        method = %request.method(),
        path = %request.uri().path(),
        correlation_id = %correlation_id,
    );

    span.in_scope(|| {
        tracing::debug!(headers = ?loggable_headers(request.headers()), "Incoming request");
    });

    let start = Instant::now();
    let response = next.run(request).instrument(span.clone()).await;
    let elapsed_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    span.in_scope(|| {
        if response.status().is_server_error() {
            tracing::warn!(status, elapsed_ms, "Request failed");
        } else if response.status().is_client_error() {
            tracing::info!(status, elapsed_ms, "Request rejected");
        } else {
            tracing::info!(status, elapsed_ms, "Request completed");
        }
    });

    response
}
