//! Access log middleware for static asset requests.
//!
//! Generates a UUID v4 for each incoming request and creates a tracing span
//! that wraps the request lifecycle, then emits one structured access-log
//! line containing the remote address, method, path, user agent, response
//! status, and duration.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use http::header::USER_AGENT;
use tracing::Instrument;
use uuid::Uuid;

/// Remote peer address, inserted into request extensions by the connection
/// handler. Absent when the router is driven without a real socket (tests).
#[derive(Clone, Copy, Debug)]
pub struct ClientAddr(pub SocketAddr);

/// Middleware that logs one access line per request.
///
/// This should be the outermost layer on the asset routes so the recorded
/// duration covers all request processing.
pub async fn access_log_layer(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let remote = request
        .extensions()
        .get::<ClientAddr>()
        .map_or_else(|| "-".to_string(), |addr| addr.0.to_string());
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    let start = Instant::now();

    async move {
        let response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            remote = %remote,
            method = %method,
            path = %path,
            user_agent = %user_agent,
            status = response.status().as_u16(),
            duration_ms,
            "Access"
        );

        response
    }
    .instrument(span)
    .await
}
