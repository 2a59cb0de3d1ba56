//! HTTP server module.
//!
//! Provides the TCP listener with its fixed connection timeouts and the
//! static asset services (embedded tree or directory root).

mod server;
pub mod static_files;

pub use server::{serve, start_server, ServerError};
