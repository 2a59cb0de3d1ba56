//! Kiosk: a minimal static-asset web server.
//!
//! This is the application entry point. It captures server info, loads
//! configuration from a TOML file, initializes tracing, opens the daily log
//! file, sets up the Axum router with the health and asset routes, and
//! starts the HTTP listener.

use std::path::Path;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kiosk::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use kiosk::http::start_server;
use kiosk::logging;
use kiosk::routes::create_router;
use kiosk::state::{AppState, ServerInfo};

/// Kiosk: a minimal web server for pre-built static assets
#[derive(Parser, Debug)]
#[command(name = "kiosk", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "kiosk=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Capture start time and build metadata before anything else
    let info = ServerInfo::capture();

    // Load configuration (missing file falls back to defaults; PORT env
    // var overrides the configured port)
    let config = AppConfig::load(&args.config)?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        name = %info.build.name,
        version = %info.build.version,
        started_at = %info.started_at.to_rfc3339(),
        "Loaded configuration"
    );

    // Open the daily log file. Failure is a degradation, not an error: the
    // server keeps running with stdout logging only. The handle is held for
    // the process lifetime; the log sink itself stays on stdout.
    let _log_file = match logging::open_daily_log(Path::new(&config.logging.directory)) {
        Ok(log) => {
            tracing::info!(path = %log.path().display(), "Server logging initialized");
            Some(log)
        }
        Err(err) => {
            tracing::warn!(error = %err, "Continuing without a log file");
            None
        }
    };

    // Create application state and router
    let state = AppState::new(config.clone(), info);
    let app = create_router(state);

    // Start server; blocks until a fatal listener error
    start_server(app, &config).await?;

    Ok(())
}
