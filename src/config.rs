//! Configuration loading and constants.
//!
//! Loads application configuration from a TOML file and defines constants for
//! the HTTP listener timeouts, security headers, logging defaults, and default
//! paths. `AppConfig` is the root configuration struct containing all settings.
//! Every field has a default, so a missing config file yields a working server
//! configured entirely from the built-in defaults and the `PORT` environment
//! variable.

use const_format::formatcp;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

// =============================================================================
// HTTP Listener Timeouts
// =============================================================================
// Fixed timeouts applied to every connection. Header read and idle keep-alive
// are enforced at the connection layer; request read and response write are
// enforced as tower-http timeout layers on the router.

/// Maximum time to read a request's headers
pub const READ_HEADER_TIMEOUT: Duration = Duration::from_secs(3);

/// Maximum time to read a full request body
pub const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Maximum time for a handler to produce its response
pub const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum time a kept-alive connection may sit idle between requests
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(120);

// =============================================================================
// Security Headers
// =============================================================================
// Set unconditionally on every static asset response.

pub const X_CONTENT_TYPE_OPTIONS: &str = "nosniff";
pub const X_FRAME_OPTIONS: &str = "DENY";
pub const X_XSS_PROTECTION: &str = "1; mode=block";
pub const CONTENT_SECURITY_POLICY: &str = "default-src 'self'";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Environment variable that overrides the listen port
pub const PORT_ENV_VAR: &str = "PORT";

/// Default listen port when neither `PORT` nor the config file set one
pub const DEFAULT_PORT: u16 = 8080;

/// Default listen host (all interfaces)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Directory served as the asset root, embedded into the binary
pub const ASSET_DIR: &str = "dist";

/// Default directory for daily log files
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Default log filter when neither `--log-level` nor `RUST_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = formatcp!("{}=info,tower_http=info", PKG_NAME);

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP listener configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Static asset source configuration
    #[serde(default)]
    pub assets: AssetConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_PORT
    }

    /// Apply a `PORT` environment override. An unset or empty value keeps the
    /// configured port; anything else must parse as a port number.
    pub fn apply_port_override(&mut self, value: Option<&str>) -> Result<(), ConfigError> {
        match value {
            None | Some("") => Ok(()),
            Some(raw) => {
                self.port = raw.parse().map_err(|_| ConfigError::Validation(format!(
                    "Invalid {PORT_ENV_VAR} value '{raw}': expected a port number"
                )))?;
                Ok(())
            }
        }
    }
}

/// Where static assets are served from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetSource {
    /// The `dist` tree embedded into the binary at build time
    Embedded,
    /// A directory root resolved at runtime
    Directory,
}

/// Static asset configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    #[serde(default = "AssetConfig::default_source")]
    pub source: AssetSource,
    /// Directory root used when `source = "directory"`
    #[serde(default = "AssetConfig::default_directory")]
    pub directory: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            source: Self::default_source(),
            directory: Self::default_directory(),
        }
    }
}

impl AssetConfig {
    fn default_source() -> AssetSource {
        AssetSource::Embedded
    }

    fn default_directory() -> String {
        ASSET_DIR.to_string()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
    /// Directory for daily log files
    #[serde(default = "LoggingConfig::default_directory")]
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: Self::default_format(),
            directory: Self::default_directory(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    fn default_directory() -> String {
        DEFAULT_LOG_DIR.to_string()
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, then apply the `PORT` environment
    /// override. A missing file is not an error: the server runs with
    /// defaults so it can be deployed with no config at all.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut config = if path.as_ref().exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str(&contents)?
        } else {
            Self::default()
        };

        let port_override = std::env::var(PORT_ENV_VAR).ok();
        config.http.apply_port_override(port_override.as_deref())?;

        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
