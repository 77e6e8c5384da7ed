//! Runtime factory for creating compose runtimes from configuration

use std::sync::Arc;

use crate::config::{RuntimeConfig, RuntimeType};

use super::docker::DockerComposeRuntime;
use super::memory::InMemoryRuntime;
use super::types::{ComposeRuntime, RuntimeError, RuntimeResult};

/// Create a compose runtime from configuration
pub async fn create_runtime(config: &RuntimeConfig) -> RuntimeResult<Arc<dyn ComposeRuntime>> {
    match config.runtime_type {
        RuntimeType::Memory => Ok(Arc::new(InMemoryRuntime::new())),
        RuntimeType::Docker => {
            let runtime = DockerComposeRuntime::new(&config.docker.binary);

            if !runtime.is_available().await {
                return Err(RuntimeError::NotAvailable(format!(
                    "'{}' is not installed or the docker daemon is not running",
                    config.docker.binary
                )));
            }

            Ok(Arc::new(runtime))
        }
    }
}
