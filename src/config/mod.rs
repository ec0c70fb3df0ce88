use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use crate::http::StatusMode;

/// Log configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LogConfig {
  /// Log level, used when RUST_LOG is not set. Default is "info"
  #[serde(default = "default_log_level")]
  pub level: String,
}

fn default_log_level() -> String {
  "info".to_string()
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      level: default_log_level(),
    }
  }
}

/// Service configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
  /// Server listening address (HTTP)
  #[serde(default = "default_server_addr")]
  pub server_addr: String,

  /// Status codes used for list/delete/patch success and bad input
  #[serde(default)]
  pub status_codes: StatusMode,

  /// Log configuration
  #[serde(default)]
  pub log: LogConfig,
}

fn default_server_addr() -> String {
  format!("0.0.0.0:{}", crate::server::DEFAULT_PORT)
}

impl Default for Config {
  fn default() -> Self {
    Self {
      server_addr: default_server_addr(),
      status_codes: StatusMode::default(),
      log: LogConfig::default(),
    }
  }
}

impl Config {
  /// Load configuration from TOML file. Validation is left to the caller so
  /// that command-line overrides can be applied first.
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let config_str = fs::read_to_string(path)
      .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

    let config: Config = toml::from_str(&config_str)
      .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;

    Ok(config)
  }

  /// Check that the listening address is an IP socket address or `host:port`.
  /// Host names are resolved when the listener binds.
  pub fn validate(&self) -> Result<()> {
    if self.server_addr.parse::<SocketAddr>().is_ok() {
      return Ok(());
    }

    let (host, port) = self
      .server_addr
      .rsplit_once(':')
      .with_context(|| format!("Invalid server_addr '{}': missing port", self.server_addr))?;
    if host.is_empty() || host.contains(char::is_whitespace) {
      bail!("Invalid server_addr '{}': bad host", self.server_addr);
    }
    port
      .parse::<u16>()
      .with_context(|| format!("Invalid server_addr '{}': bad port", self.server_addr))?;
    Ok(())
  }
}
