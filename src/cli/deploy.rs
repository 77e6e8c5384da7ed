//! One-shot deployment command handlers (brokers, up, down, health).

use std::path::Path;

use anyhow::{Context, Result};

use super::common::{build_manager, build_registry, load_config};

/// List known brokers.
pub(crate) fn cmd_brokers(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let registry = build_registry(&config)?;

    println!("Brokers");
    println!("=======");
    for broker in registry.iter() {
        if broker.is_deployable() {
            let files: Vec<String> = broker
                .deployment_files
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            println!("  {:<12} {}", broker.name, files.join(", "));
            if !broker.expected_container_names.is_empty() {
                println!(
                    "  {:<12} containers: {}",
                    "",
                    broker.expected_container_names.join(", ")
                );
            }
        } else {
            println!("  {:<12} (not implemented)", broker.name);
        }
    }
    Ok(())
}

/// Build and start a broker deployment.
pub(crate) async fn cmd_up(config_path: &Path, broker: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let mut manager = build_manager(&config).await?;
    manager.initialize(broker)?;
    manager
        .up()
        .await
        .with_context(|| format!("Failed to bring up {}", broker))?;
    println!("[OK] {} is up", broker);
    Ok(())
}

/// Stop a broker deployment.
pub(crate) async fn cmd_down(config_path: &Path, broker: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let mut manager = build_manager(&config).await?;
    manager.initialize(broker)?;
    manager
        .down()
        .await
        .with_context(|| format!("Failed to bring down {}", broker))?;
    println!("[OK] {} is down", broker);
    Ok(())
}

/// Print the health report of a broker deployment.
pub(crate) async fn cmd_health(config_path: &Path, broker: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let mut manager = build_manager(&config).await?;
    manager.initialize(broker)?;
    let report = manager.check_health_status().await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
