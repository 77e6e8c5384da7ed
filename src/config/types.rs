//! Configuration type definitions for the broker manager
//!
//! All types implement serde traits for JSON serialization and have sensible
//! defaults, so an empty `{}` (or a missing file) yields a working config.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::broker::default_descriptor_store;
use crate::compose::DEFAULT_ENV_FILE;

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP API server
    pub server: ServerConfig,
    /// Log output
    pub logging: LoggingConfig,
    /// Container runtime backend
    pub runtime: RuntimeConfig,
    /// Broker deployments
    pub compose: ComposeConfig,
}

// ============================================================================
// Server Configuration
// ============================================================================

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

// ============================================================================
// Logging Configuration
// ============================================================================

/// Log line format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output
    Pretty,
    /// Compact single-line output with targets
    #[default]
    Component,
    /// JSON lines
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "component" => Ok(LogFormat::Component),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
    /// Append logs to this file instead of stderr. Only honoured by the
    /// `json` format.
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Component,
            level: "info".to_string(),
            file: None,
        }
    }
}

// ============================================================================
// Runtime Configuration
// ============================================================================

/// Container runtime backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeType {
    /// `docker compose` CLI
    #[default]
    Docker,
    /// In-process runtime that starts nothing (dry runs)
    Memory,
}

impl std::str::FromStr for RuntimeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "docker" => Ok(RuntimeType::Docker),
            "memory" => Ok(RuntimeType::Memory),
            other => Err(format!("unknown runtime type '{}'", other)),
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Backend used to run broker deployments
    pub runtime_type: RuntimeType,
    /// Docker-specific configuration
    pub docker: DockerConfig,
}

/// Docker runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerConfig {
    /// Docker CLI binary
    pub binary: String,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            binary: "docker".to_string(),
        }
    }
}

// ============================================================================
// Compose Configuration
// ============================================================================

/// Broker deployment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Environment file passed to every deployment
    pub env_file: String,
    /// Broker name -> deployment files. An empty list marks a broker that is
    /// recognised but not deployable yet.
    pub brokers: BTreeMap<String, Vec<String>>,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            env_file: DEFAULT_ENV_FILE.to_string(),
            brokers: default_descriptor_store(),
        }
    }
}
