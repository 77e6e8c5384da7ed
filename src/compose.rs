//! Broker deployment lifecycle manager.
//!
//! [`LifecycleManager`] binds to one broker at a time and drives a runtime
//! session through `initialize` → `up` → `down`. It holds no lock: mutating
//! operations take `&mut self`, so sharing one manager between concurrent
//! callers requires a lock owned by the caller (the API server wraps it in a
//! `tokio::sync::Mutex`).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::broker::BrokerRegistry;
use crate::error::{ManagerError, Result};
use crate::health::{self, HealthReport};
use crate::runtime::{ComposeProject, ComposeRuntime};

/// Environment file shared by every broker deployment.
pub const DEFAULT_ENV_FILE: &str = "./composes/.env";

/// Handle on the runtime scoped to one broker's deployment files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSession {
    project: ComposeProject,
}

impl RuntimeSession {
    fn new(files: Vec<PathBuf>, env_file: &Path) -> Self {
        Self {
            project: ComposeProject::new(files, env_file),
        }
    }

    pub fn project(&self) -> &ComposeProject {
        &self.project
    }
}

/// What the manager is currently bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub broker: String,
    pub session: RuntimeSession,
    pub expected_container_names: Vec<String>,
}

/// Lifecycle state. `up`/`down` are not tracked as states; they are
/// operations that are only valid while [`LifecycleState::Bound`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    Bound(Binding),
}

/// Drives one broker deployment at a time through the container runtime.
pub struct LifecycleManager {
    registry: Arc<BrokerRegistry>,
    runtime: Arc<dyn ComposeRuntime>,
    env_file: PathBuf,
    state: LifecycleState,
}

impl LifecycleManager {
    /// Create an uninitialized manager using [`DEFAULT_ENV_FILE`].
    pub fn new(registry: Arc<BrokerRegistry>, runtime: Arc<dyn ComposeRuntime>) -> Self {
        Self {
            registry,
            runtime,
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            state: LifecycleState::Uninitialized,
        }
    }

    /// Set the environment file handed to the runtime with every session.
    pub fn with_env_file(mut self, env_file: impl Into<PathBuf>) -> Self {
        self.env_file = env_file.into();
        self
    }

    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    /// Name of the bound broker, if any.
    pub fn bound_broker(&self) -> Option<&str> {
        match &self.state {
            LifecycleState::Bound(binding) => Some(&binding.broker),
            LifecycleState::Uninitialized => None,
        }
    }

    pub fn registry(&self) -> &BrokerRegistry {
        &self.registry
    }

    pub fn env_file(&self) -> &Path {
        &self.env_file
    }

    /// Bind to `broker`, replacing any previous session.
    ///
    /// Nothing is started. Rebinding while already bound does not bring the
    /// previous deployment down. On error the state is left untouched.
    pub fn initialize(&mut self, broker: &str) -> Result<()> {
        let descriptor = self.registry.lookup(broker)?;
        if !descriptor.is_deployable() {
            return Err(ManagerError::unimplemented(broker));
        }

        let binding = Binding {
            broker: descriptor.name.clone(),
            session: RuntimeSession::new(descriptor.deployment_files.clone(), &self.env_file),
            expected_container_names: descriptor.expected_container_names.clone(),
        };

        info!(
            broker = %binding.broker,
            previous = ?self.bound_broker(),
            files = binding.session.project().files.len(),
            "Bound broker deployment"
        );
        self.state = LifecycleState::Bound(binding);
        Ok(())
    }

    fn binding(&self) -> Result<&Binding> {
        match &self.state {
            LifecycleState::Bound(binding) => Ok(binding),
            LifecycleState::Uninitialized => Err(ManagerError::compose_initialization()),
        }
    }

    /// Build the images, then start every service detached.
    ///
    /// Runtime errors propagate unchanged; after one the binding stays but
    /// the real deployment state is unknown.
    pub async fn up(&self) -> Result<()> {
        let binding = self.binding()?;
        let project = binding.session.project();

        info!(broker = %binding.broker, "Building broker images");
        self.runtime.build(project).await?;

        info!(broker = %binding.broker, "Starting broker deployment");
        self.runtime.up(project, true).await?;
        Ok(())
    }

    /// Stop the deployment and remove its volumes. The binding is kept, so
    /// `up` may be called again.
    pub async fn down(&self) -> Result<()> {
        let binding = self.binding()?;

        info!(broker = %binding.broker, "Stopping broker deployment");
        self.runtime.down(binding.session.project(), true).await?;
        Ok(())
    }

    /// Rollup health of the bound broker's containers.
    pub async fn check_health_status(&self) -> Result<HealthReport> {
        let binding = self.binding()?;
        let report = health::aggregate(
            self.runtime.as_ref(),
            binding.session.project(),
            &binding.expected_container_names,
        )
        .await?;
        Ok(report)
    }
}
