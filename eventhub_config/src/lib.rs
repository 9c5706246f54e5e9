//! Consumer configuration
//!
//! Loads event-hub consumer settings from TOML files and environment
//! variables.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// Validation error
    #[error("Invalid config: {0}")]
    Validation(String),

    /// Environment variable error
    #[error("Invalid environment variable: {0}")]
    EnvVar(String),
}

/// Config result type
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Environment variable overriding [`ConsumerConfig::peer_address`]
pub const ENV_PEER_ADDRESS: &str = "EVENTHUB_PEER_ADDRESS";
/// Environment variable overriding [`ConsumerConfig::connect_timeout_ms`]
pub const ENV_CONNECT_TIMEOUT_MS: &str = "EVENTHUB_CONNECT_TIMEOUT_MS";
/// Environment variable overriding [`ConsumerConfig::registration_timeout_ms`]
pub const ENV_REGISTRATION_TIMEOUT_MS: &str = "EVENTHUB_REGISTRATION_TIMEOUT_MS";

/// Event hub consumer configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerConfig {
    /// Address of the peer hosting the event hub
    #[serde(default = "default_peer_address")]
    pub peer_address: String,

    /// Dial timeout in milliseconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,

    /// How long to wait for the registration acknowledgement, in milliseconds
    #[serde(default = "default_registration_timeout")]
    pub registration_timeout_ms: u64,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            peer_address: default_peer_address(),
            connect_timeout_ms: default_connect_timeout(),
            registration_timeout_ms: default_registration_timeout(),
        }
    }
}

impl ConsumerConfig {
    /// Load config from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse config from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Override fields from environment variables
    ///
    /// Supported variables:
    /// - `EVENTHUB_PEER_ADDRESS`: peer address
    /// - `EVENTHUB_CONNECT_TIMEOUT_MS`: dial timeout in milliseconds
    /// - `EVENTHUB_REGISTRATION_TIMEOUT_MS`: registration timeout in milliseconds
    pub fn load_with_env_override(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Load from file, then apply environment overrides
    pub fn from_file_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_file(path)?.load_with_env_override()
    }

    fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup(ENV_PEER_ADDRESS) {
            self.peer_address = addr;
        }

        if let Some(ms) = lookup(ENV_CONNECT_TIMEOUT_MS) {
            self.connect_timeout_ms = parse_millis(ENV_CONNECT_TIMEOUT_MS, &ms)?;
        }

        if let Some(ms) = lookup(ENV_REGISTRATION_TIMEOUT_MS) {
            self.registration_timeout_ms = parse_millis(ENV_REGISTRATION_TIMEOUT_MS, &ms)?;
        }

        Ok(self)
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<()> {
        if self.peer_address.trim().is_empty() {
            return Err(ConfigError::Validation(
                "peer_address must not be empty".to_string(),
            ));
        }

        if self.connect_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "connect_timeout_ms must be > 0".to_string(),
            ));
        }

        if self.registration_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "registration_timeout_ms must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Dial timeout
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Registration acknowledgement timeout
    pub fn registration_timeout(&self) -> Duration {
        Duration::from_millis(self.registration_timeout_ms)
    }

    /// One-line-per-field summary for startup logs
    pub fn summary(&self) -> String {
        format!(
            "EventHub consumer config:\n  peer: {}\n  connect timeout: {}ms\n  registration timeout: {}ms",
            self.peer_address, self.connect_timeout_ms, self.registration_timeout_ms
        )
    }
}

fn parse_millis(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvVar(format!("{key} must be a valid u64 millisecond count")))
}

fn default_peer_address() -> String {
    "127.0.0.1:7053".to_string()
}

fn default_connect_timeout() -> u64 {
    3_000
}

fn default_registration_timeout() -> u64 {
    5_000
}
