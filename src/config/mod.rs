//! Configuration management for mainte-servers
//!
//! This module loads the API endpoint, request timeout and user agent from
//! environment variables or a TOML file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default SAKURA Cloud API root
pub const DEFAULT_API_BASE_URL: &str = "https://secure.sakura.ad.jp/cloud";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API root; maintenance and zone endpoints are built under it
    pub api_base_url: String,

    /// Request timeout in seconds, unset for no timeout
    pub request_timeout_secs: Option<u64>,

    /// User agent string
    pub user_agent: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let api_base_url =
            std::env::var("MAINTE_SERVERS_API_BASE_URL").unwrap_or(defaults.api_base_url);

        let request_timeout_secs = match std::env::var("MAINTE_SERVERS_REQUEST_TIMEOUT") {
            Ok(v) => Some(v.parse::<u64>().map_err(|e| {
                Error::config(format!("Invalid MAINTE_SERVERS_REQUEST_TIMEOUT {v:?}: {e}"))
            })?),
            Err(_) => None,
        };

        let user_agent =
            std::env::var("MAINTE_SERVERS_USER_AGENT").unwrap_or(defaults.user_agent);

        Ok(Self {
            api_base_url,
            request_timeout_secs,
            user_agent,
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            Error::config(format!("Failed to parse TOML config file {}: {e}", path.display()))
        })?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api_base_url).map_err(|e| {
            Error::config(format!(
                "api_base_url is not a valid URL {:?}: {e}",
                self.api_base_url
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config("api_base_url must use http or https"));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(Error::config("request_timeout_secs must be greater than 0"));
        }

        Ok(())
    }

    /// API root without a trailing slash
    pub fn api_base(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: String::from(DEFAULT_API_BASE_URL),
            request_timeout_secs: None,
            user_agent: format!("mainte-servers/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
