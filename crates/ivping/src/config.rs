//! Settings file parsing
//!
//! Reads optional overrides from `<data dir>/ivping.toml`. Every key has a
//! default, so a missing file or an empty one yields the built-in behavior.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// SSH web gateway endpoint; the hostname is appended verbatim.
pub const DEFAULT_GATEWAY_URL: &str = "https://s6006as3039.petrobras.biz/cgi-bin/ssh.sh?";
/// Echo requests sent by a bounded ping.
pub const DEFAULT_PING_COUNT: u32 = 8;

/// Error type for config operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}

/// Result type for config operations
pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Host spreadsheet override (defaults to `<data dir>/data_hosts.xlsx`)
    #[serde(default)]
    pub hosts_file: Option<PathBuf>,

    #[serde(default)]
    pub ping: PingConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingConfig {
    /// Echo requests for a bounded ping
    #[serde(default = "default_ping_count")]
    pub count: u32,

    /// Terminal emulator used on Linux/BSD (`<terminal> -e <script>`)
    #[serde(default)]
    pub terminal: Option<String>,
}

impl Default for PingConfig {
    fn default() -> Self {
        Self {
            count: default_ping_count(),
            terminal: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_gateway_url")]
    pub base_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_gateway_url(),
        }
    }
}

fn default_ping_count() -> u32 {
    DEFAULT_PING_COUNT
}

fn default_gateway_url() -> String {
    DEFAULT_GATEWAY_URL.to_string()
}

impl AppConfig {
    /// Load settings; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        let config: AppConfig = toml::from_str(content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;

        if config.ping.count == 0 {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                message: "ping.count must be at least 1".to_string(),
            });
        }
        if config.gateway.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                message: "gateway.base_url must not be empty".to_string(),
            });
        }

        Ok(config)
    }
}
