//! Types shared by every compose runtime backend

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a container runtime.
///
/// These are surfaced to callers unchanged; the lifecycle manager never
/// retries or wraps them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// The runtime binary or daemon cannot be reached
    #[error("Runtime not available: {0}")]
    NotAvailable(String),

    /// The runtime process could not be spawned
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// The runtime ran but reported a failure
    #[error("`{command}` exited with status {code:?}: {stderr}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The runtime output could not be understood
    #[error("Unexpected runtime output: {0}")]
    Parse(String),
}

/// Result type for runtime operations
pub type RuntimeResult<T> = std::result::Result<T, RuntimeError>;

/// The scope a runtime operation applies to: one broker's deployment files
/// plus the shared environment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeProject {
    /// Deployment files, in declaration order
    pub files: Vec<PathBuf>,
    /// Environment file handed to the runtime alongside the deployment files
    pub env_file: PathBuf,
}

impl ComposeProject {
    pub fn new(files: Vec<PathBuf>, env_file: impl Into<PathBuf>) -> Self {
        Self {
            files,
            env_file: env_file.into(),
        }
    }
}

/// Live state of one container as reported by `inspect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectedContainer {
    /// Container name
    pub name: String,
    /// Runtime status, free-form (e.g. "running", "exited")
    pub status: String,
    /// Health-check status, `None` when the container declares no health check
    pub health: Option<String>,
}

impl InspectedContainer {
    pub fn new(name: &str, status: &str, health: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            status: status.to_string(),
            health: health.map(str::to_string),
        }
    }
}

/// Capability the lifecycle manager needs from a container engine.
///
/// Implementations must treat each call as blocking until the engine is done
/// (image builds can take minutes). No cancellation or timeout is applied
/// here; callers impose their own.
#[async_trait]
pub trait ComposeRuntime: Send + Sync {
    /// Short backend name (e.g. "docker")
    fn name(&self) -> &str;

    /// Whether the backend can be used on this host
    async fn is_available(&self) -> bool;

    /// Build the images declared by the project
    async fn build(&self, project: &ComposeProject) -> RuntimeResult<()>;

    /// Start every service of the project
    async fn up(&self, project: &ComposeProject, detach: bool) -> RuntimeResult<()>;

    /// Stop the project, optionally removing its volumes
    async fn down(&self, project: &ComposeProject, remove_volumes: bool) -> RuntimeResult<()>;

    /// Names of the containers currently belonging to the project
    async fn list_containers(&self, project: &ComposeProject) -> RuntimeResult<Vec<String>>;

    /// Inspect the named containers, preserving the order of `names`
    async fn inspect(&self, names: &[String]) -> RuntimeResult<Vec<InspectedContainer>>;
}
