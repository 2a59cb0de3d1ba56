//! HTTP route assembly.
//!
//! Two route groups: the health endpoint and the static asset fallback.
//! Asset responses carry four fixed security headers and an access-log line
//! per request; the health endpoint carries neither, matching its role as a
//! plain liveness probe. The response-write timeout applies router-wide;
//! the request-read timeout is applied where requests enter the router, see
//! `http::server`.

pub mod health;

use axum::{middleware, routing::get, Router};
use http::header::{
    HeaderValue, CONTENT_SECURITY_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS,
    X_XSS_PROTECTION,
};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::config;
use crate::http::static_files::asset_routes;
use crate::middleware::access_log_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes, security headers, and timeouts.
pub fn create_router(state: AppState) -> Router {
    // Health check - no security headers, no access log, always fresh
    let health_routes = Router::new().route("/health", get(health::health));

    // Static assets - every response gets the fixed security headers and
    // one access-log line
    let static_routes = asset_routes(&state.config.assets)
        .layer(SetResponseHeaderLayer::overriding(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static(config::X_CONTENT_TYPE_OPTIONS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            X_FRAME_OPTIONS,
            HeaderValue::from_static(config::X_FRAME_OPTIONS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            X_XSS_PROTECTION,
            HeaderValue::from_static(config::X_XSS_PROTECTION),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(config::CONTENT_SECURITY_POLICY),
        ))
        .layer(middleware::from_fn(access_log_layer));

    Router::new()
        .merge(health_routes)
        .merge(static_routes)
        .with_state(state)
        .layer(TimeoutLayer::new(config::WRITE_TIMEOUT))
}
