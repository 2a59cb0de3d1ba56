//! HTTP listener and per-connection serving.
//!
//! Binds the configured address and serves each accepted connection on its
//! own task over HTTP/1.1 with keep-alive. Timeouts:
//! - header read (3s) is enforced by hyper's connection builder;
//! - idle keep-alive (120s) is enforced by a per-connection watchdog that
//!   gracefully shuts the connection down once no request activity has been
//!   seen for the full window;
//! - request read (5s) wraps every request body in a `TimeoutBody` before
//!   it enters the router;
//! - response write (10s) is a router-wide layer, see
//!   `routes::create_router`.
//!
//! Bind and accept errors are fatal: they propagate to main and terminate
//! the process. There is no graceful shutdown, restart, or reload.

use std::net::SocketAddr;
use std::pin::pin;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::Router;
use hyper::{body::Incoming, server::conn::http1, service::service_fn, Request};
use hyper_util::rt::{TokioIo, TokioTimer};
use tokio::net::{TcpListener, TcpStream};
use tower::ServiceExt;
use tower_http::timeout::TimeoutBody;

use crate::config::{AppConfig, IDLE_TIMEOUT, READ_HEADER_TIMEOUT, READ_TIMEOUT};
use crate::middleware::ClientAddr;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address '{0}'")]
    InvalidAddr(String),

    #[error("Failed to bind server: {0}")]
    Bind(std::io::Error),

    #[error("Failed to accept connection: {0}")]
    Accept(std::io::Error),
}

/// Bind the configured address and serve until a fatal socket error.
///
/// This function blocks for the lifetime of the process.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let raw_addr = format!("{}:{}", config.http.host, config.http.port);
    let addr: SocketAddr = raw_addr
        .parse()
        .map_err(|_| ServerError::InvalidAddr(raw_addr))?;

    let listener = TcpListener::bind(addr).await.map_err(ServerError::Bind)?;
    let local_addr = listener.local_addr().map_err(ServerError::Bind)?;
    tracing::info!("Starting server at http://{}", local_addr);

    serve(listener, app).await
}

/// Serve connections from an already-bound listener until an accept error.
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), ServerError> {
    loop {
        let (stream, peer_addr) = listener.accept().await.map_err(ServerError::Accept)?;
        let app = app.clone();
        tokio::spawn(serve_connection(stream, peer_addr, app));
    }
}

/// Last-seen request activity on a connection, shared between the request
/// service and the idle watchdog.
#[derive(Clone)]
struct ConnActivity(Arc<Mutex<Instant>>);

impl ConnActivity {
    fn new() -> Self {
        Self(Arc::new(Mutex::new(Instant::now())))
    }

    fn touch(&self) {
        *self.0.lock().unwrap() = Instant::now();
    }

    fn deadline(&self, timeout: Duration) -> Instant {
        *self.0.lock().unwrap() + timeout
    }

    fn expired(&self, timeout: Duration) -> bool {
        self.0.lock().unwrap().elapsed() >= timeout
    }
}

async fn serve_connection(stream: TcpStream, peer_addr: SocketAddr, app: Router) {
    let io = TokioIo::new(stream);
    let activity = ConnActivity::new();

    let service = service_fn({
        let activity = activity.clone();
        move |mut request: Request<Incoming>| {
            activity.touch();
            request.extensions_mut().insert(ClientAddr(peer_addr));
            let request = request.map(|body| TimeoutBody::new(READ_TIMEOUT, body));
            let app = app.clone();
            let activity = activity.clone();
            async move {
                let response = app.oneshot(request).await;
                activity.touch();
                response
            }
        }
    });

    let mut builder = http1::Builder::new();
    builder
        .timer(TokioTimer::new())
        .header_read_timeout(READ_HEADER_TIMEOUT)
        .keep_alive(true);

    let mut conn = pin!(builder.serve_connection(io, service));

    loop {
        let deadline = tokio::time::Instant::from_std(activity.deadline(IDLE_TIMEOUT));
        tokio::select! {
            result = conn.as_mut() => {
                if let Err(err) = result {
                    tracing::debug!(remote = %peer_addr, error = %err, "Connection ended with error");
                }
                return;
            }
            () = tokio::time::sleep_until(deadline) => {
                // The deadline may be stale if a request landed while we
                // slept; re-check before closing.
                if activity.expired(IDLE_TIMEOUT) {
                    tracing::debug!(remote = %peer_addr, "Closing idle connection");
                    conn.as_mut().graceful_shutdown();
                    if let Err(err) = conn.as_mut().await {
                        tracing::debug!(remote = %peer_addr, error = %err, "Error closing idle connection");
                    }
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_activity_is_not_expired() {
        let activity = ConnActivity::new();
        assert!(!activity.expired(Duration::from_secs(120)));
    }

    #[test]
    fn touch_pushes_the_deadline_forward() {
        let activity = ConnActivity::new();
        let before = activity.deadline(Duration::from_secs(120));
        std::thread::sleep(Duration::from_millis(5));
        activity.touch();
        assert!(activity.deadline(Duration::from_secs(120)) > before);
    }

    #[test]
    fn zero_timeout_expires_immediately() {
        let activity = ConnActivity::new();
        std::thread::sleep(Duration::from_millis(1));
        assert!(activity.expired(Duration::ZERO));
    }
}
