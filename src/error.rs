//! Error types for the broker manager
//!
//! Two families of failure live here:
//! - usage errors raised by the lifecycle manager itself (calling `up` before
//!   `initialize`, asking for a broker that does not exist, asking for a
//!   broker that has no deployment yet). Each carries the offending input
//!   (`data`) and a human-readable `message`.
//! - everything else: runtime failures surfaced unchanged from the container
//!   engine, config and I/O problems.
//!
//! Uses `thiserror` for the `Display` and `Error` implementations.

use std::path::PathBuf;
use thiserror::Error;

use crate::runtime::RuntimeError;

/// Default message for [`ManagerError::ComposeInitialization`].
pub const COMPOSE_INITIALIZATION_MESSAGE: &str =
    "Compose:initialize should be call before calling Compose:up";

/// Default message for [`ManagerError::Unimplemented`].
pub const UNIMPLEMENTED_MESSAGE: &str = "Unimplemented deployment for this broker";

/// The primary error type for broker manager operations.
#[derive(Error, Debug)]
pub enum ManagerError {
    /// `up`, `down` or a health check was attempted before `initialize`.
    #[error("{data} -> {message}")]
    ComposeInitialization { data: String, message: String },

    /// The broker name is not a key of the registry.
    #[error("{data} -> {message}")]
    UnknownBroker { data: String, message: String },

    /// The broker name is known but has no deployment files configured.
    #[error("{data} -> {message}")]
    Unimplemented { data: String, message: String },

    /// Failure reported by the container runtime, passed through untouched.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// A deployment file could not be read while building the registry.
    #[error("Failed to read deployment file {}: {source}", path.display())]
    DeploymentFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration-related errors (invalid values, unreadable file, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Standard I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ManagerError {
    /// State precondition violation: the manager has no runtime session yet.
    pub fn compose_initialization() -> Self {
        ManagerError::ComposeInitialization {
            data: String::new(),
            message: COMPOSE_INITIALIZATION_MESSAGE.to_string(),
        }
    }

    /// The broker `name` is not registered. `valid` lists the accepted names.
    pub fn unknown_broker<I, S>(name: &str, valid: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let valid: Vec<String> = valid
            .into_iter()
            .map(|s| format!("'{}'", s.as_ref()))
            .collect();
        ManagerError::UnknownBroker {
            data: name.to_string(),
            message: format!(
                "Unknown Context Broker name. Valid values: [{}]",
                valid.join(", ")
            ),
        }
    }

    /// The broker `name` is registered but cannot be deployed yet.
    pub fn unimplemented(name: &str) -> Self {
        ManagerError::Unimplemented {
            data: name.to_string(),
            message: UNIMPLEMENTED_MESSAGE.to_string(),
        }
    }

    /// Short machine-readable tag, used as the `error` field of API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            ManagerError::ComposeInitialization { .. } => "compose_initialization",
            ManagerError::UnknownBroker { .. } => "unknown_broker",
            ManagerError::Unimplemented { .. } => "unimplemented",
            ManagerError::Runtime(_) => "runtime",
            ManagerError::DeploymentFile { .. } => "deployment_file",
            ManagerError::Config(_) => "config",
            ManagerError::Io(_) => "io",
            ManagerError::Json(_) => "json",
        }
    }

    /// Returns `true` for the structured usage errors of the taxonomy.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            ManagerError::ComposeInitialization { .. }
                | ManagerError::UnknownBroker { .. }
                | ManagerError::Unimplemented { .. }
        )
    }

    /// The offending input of a usage error.
    pub fn data(&self) -> Option<&str> {
        match self {
            ManagerError::ComposeInitialization { data, .. }
            | ManagerError::UnknownBroker { data, .. }
            | ManagerError::Unimplemented { data, .. } => Some(data),
            _ => None,
        }
    }

    /// The human-readable explanation of a usage error.
    pub fn message(&self) -> Option<&str> {
        match self {
            ManagerError::ComposeInitialization { message, .. }
            | ManagerError::UnknownBroker { message, .. }
            | ManagerError::Unimplemented { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Returns the HTTP status code the API layer answers with.
    pub fn status_code(&self) -> u16 {
        match self {
            ManagerError::ComposeInitialization { .. } => 409,
            ManagerError::UnknownBroker { .. } => 404,
            ManagerError::Unimplemented { .. } => 501,
            _ => 500,
        }
    }
}

/// A specialized `Result` type for broker manager operations.
pub type Result<T> = std::result::Result<T, ManagerError>;
