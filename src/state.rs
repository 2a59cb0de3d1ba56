//! Shared application state for request handlers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::config::AppConfig;

/// Build metadata captured at compile time.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
}

impl BuildInfo {
    fn from_env() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Process-wide server information, captured once at startup and read-only
/// thereafter. The health handler derives uptime from `start_instant`, which
/// is monotonic, so reported uptime never decreases even if the wall clock
/// steps backwards.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub started_at: DateTime<Utc>,
    pub start_instant: Instant,
    pub build: BuildInfo,
    pub version: &'static str,
}

impl ServerInfo {
    /// Capture server information at process start.
    pub fn capture() -> Self {
        Self {
            started_at: Utc::now(),
            start_instant: Instant::now(),
            build: BuildInfo::from_env(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    /// Elapsed time since process start.
    pub fn uptime(&self) -> Duration {
        self.start_instant.elapsed()
    }

    /// Uptime as a human-readable string, truncated to whole seconds.
    pub fn uptime_human(&self) -> String {
        format_uptime(self.uptime())
    }
}

fn format_uptime(uptime: Duration) -> String {
    let secs = Duration::from_secs(uptime.as_secs());
    humantime::format_duration(secs).to_string()
}

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub info: Arc<ServerInfo>,
}

impl AppState {
    /// Creates a new application state from the given configuration and
    /// server information.
    pub fn new(config: AppConfig, info: ServerInfo) -> Self {
        Self {
            config: Arc::new(config),
            info: Arc::new(info),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_is_monotonically_non_decreasing() {
        let info = ServerInfo::capture();
        let first = info.uptime();
        let second = info.uptime();
        assert!(second >= first);
    }

    #[test]
    fn uptime_format_truncates_to_seconds() {
        assert_eq!(format_uptime(Duration::from_millis(90_500)), "1m 30s");
        assert_eq!(format_uptime(Duration::ZERO), "0s");
    }

    #[test]
    fn build_info_matches_crate() {
        let info = ServerInfo::capture();
        assert_eq!(info.build.name, "kiosk");
        assert_eq!(info.version, info.build.version);
    }
}
