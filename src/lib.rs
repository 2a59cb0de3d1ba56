//! Kiosk - minimal static asset server
//!
//! Serves a tree of pre-built files (embedded into the binary by default)
//! over HTTP/1.1 with fixed security headers, logs each request, and exposes
//! a `/health` liveness endpoint.

pub mod config;
pub mod http;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod state;
