//! Configuration for a gateway radio entity
//!
//! Mirrors the options a host exposes for the platform: the device address,
//! its auth token, an optional display name and the poll interval.

use std::time::Duration;

use miio_client::Token;
use serde::Deserialize;
use thiserror::Error;

/// Display name used when none is configured
pub const DEFAULT_NAME: &str = "Xiaomi Gateway Radio";

/// How often the host should poll the device
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(10);

/// Pause before the first poll after a command the device reflects with latency
pub const SETTLE_DELAY: Duration = Duration::from_secs(3);

/// Default cap on concurrently running blocking device calls
pub const DEFAULT_MAX_BLOCKING_CALLS: usize = 4;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be decoded
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// A field has a value the platform cannot use
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Platform configuration for one gateway radio
#[derive(Debug, Clone, Deserialize)]
pub struct RadioConfig {
    /// Network address of the gateway
    pub host: String,

    /// 32-character miIO token
    pub token: Token,

    /// Entity display name
    /// Default: "Xiaomi Gateway Radio"
    #[serde(default = "default_name")]
    pub name: String,

    /// Poll interval in seconds
    /// Default: 10
    #[serde(default = "default_scan_interval_secs")]
    pub scan_interval_secs: u64,

    /// Maximum blocking device calls in flight at once
    /// Default: 4
    #[serde(default = "default_max_blocking_calls")]
    pub max_blocking_calls: usize,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_scan_interval_secs() -> u64 {
    DEFAULT_SCAN_INTERVAL.as_secs()
}

fn default_max_blocking_calls() -> usize {
    DEFAULT_MAX_BLOCKING_CALLS
}

impl RadioConfig {
    /// Create a configuration with default name and intervals
    pub fn new(host: impl Into<String>, token: Token) -> Self {
        Self {
            host: host.into(),
            token,
            name: default_name(),
            scan_interval_secs: default_scan_interval_secs(),
            max_blocking_calls: default_max_blocking_calls(),
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the poll interval (whole seconds)
    pub fn with_scan_interval(mut self, interval: Duration) -> Self {
        self.scan_interval_secs = interval.as_secs();
        self
    }

    /// Set the blocking call cap
    pub fn with_max_blocking_calls(mut self, max: usize) -> Self {
        self.max_blocking_calls = max;
        self
    }

    /// The poll interval as a `Duration`
    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
    }

    /// Parse and validate a JSON configuration document
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "host",
                reason: "must not be empty".to_string(),
            });
        }

        if self.scan_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scan_interval_secs",
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.max_blocking_calls == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_blocking_calls",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}
