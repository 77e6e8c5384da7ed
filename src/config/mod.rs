//! Configuration management for the broker manager
//!
//! Configuration is loaded from `./common/config.json` (relative to the
//! working directory) with environment variable overrides.

mod types;
pub mod validate;

pub use types::*;

use crate::error::{ManagerError, Result};
use std::path::{Path, PathBuf};

/// Prefix of every environment override.
pub const ENV_PREFIX: &str = "BROKER_MANAGER";

impl Config {
    /// Returns the default config file path (./common/config.json)
    pub fn path() -> PathBuf {
        PathBuf::from("common").join("config.json")
    }

    /// Load configuration from the default path with environment overrides.
    ///
    /// If the config file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::path())
    }

    /// Load configuration from a specific path with environment overrides.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            Config::default()
        };

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Environment variables follow the pattern: BROKER_MANAGER_SECTION_KEY
    fn apply_env_overrides(&mut self) -> Result<()> {
        // Server
        if let Some(val) = env_override("SERVER_HOST") {
            self.server.host = val;
        }
        if let Some(val) = env_override("SERVER_PORT") {
            self.server.port = val
                .parse()
                .map_err(|_| ManagerError::Config(format!("invalid server port '{}'", val)))?;
        }

        // Logging
        if let Some(val) = env_override("LOGGING_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = env_override("LOGGING_FORMAT") {
            self.logging.format = val.parse().map_err(ManagerError::Config)?;
        }

        // Runtime
        if let Some(val) = env_override("RUNTIME_TYPE") {
            self.runtime.runtime_type = val.parse().map_err(ManagerError::Config)?;
        }
        if let Some(val) = env_override("RUNTIME_DOCKER_BINARY") {
            self.runtime.docker.binary = val;
        }

        // Compose
        if let Some(val) = env_override("COMPOSE_ENV_FILE") {
            self.compose.env_file = val;
        }

        Ok(())
    }
}

fn env_override(key: &str) -> Option<String> {
    std::env::var(format!("{}_{}", ENV_PREFIX, key)).ok()
}
