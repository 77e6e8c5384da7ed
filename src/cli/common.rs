//! Shared CLI helpers used across multiple command handlers.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use broker_manager::config::Config;
use broker_manager::runtime::create_runtime;
use broker_manager::{BrokerRegistry, LifecycleManager};

/// Load the config at `path` (defaults when missing, env overrides applied).
pub(crate) fn load_config(path: &Path) -> Result<Config> {
    Config::load_from_path(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Build the broker registry described by `config`.
pub(crate) fn build_registry(config: &Config) -> Result<BrokerRegistry> {
    BrokerRegistry::load(config.compose.brokers.clone())
        .with_context(|| "Failed to build the broker registry")
}

/// Build an uninitialized lifecycle manager from `config`.
pub(crate) async fn build_manager(config: &Config) -> Result<LifecycleManager> {
    let registry = build_registry(config)?;
    let runtime = create_runtime(&config.runtime)
        .await
        .with_context(|| "Failed to create the container runtime")?;

    info!(
        runtime = runtime.name(),
        brokers = registry.len(),
        env_file = %config.compose.env_file,
        "Lifecycle manager ready"
    );

    Ok(LifecycleManager::new(Arc::new(registry), runtime).with_env_file(&config.compose.env_file))
}
