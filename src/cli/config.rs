//! Config check command handler.

use std::path::Path;

use anyhow::{Context, Result};

use broker_manager::config::validate::{validate_config, DiagnosticLevel};

use super::ConfigAction;

/// Validate configuration file.
pub(crate) fn cmd_config(config_path: &Path, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Check => {
            println!("Config file: {}", config_path.display());

            if !config_path.exists() {
                println!("[OK] No config file found (using defaults)");
                return Ok(());
            }

            let content =
                std::fs::read_to_string(config_path).context("Failed to read config file")?;

            let raw: serde_json::Value = match serde_json::from_str(&content) {
                Ok(v) => v,
                Err(e) => {
                    println!("[ERROR] Invalid JSON: {}", e);
                    return Ok(());
                }
            };

            // Deployment file paths are relative to the working directory,
            // the same way the registry resolves them.
            let diagnostics = validate_config(&raw, Path::new("."));
            for diag in &diagnostics {
                println!("{}", diag);
            }

            let errors = diagnostics
                .iter()
                .filter(|d| d.level == DiagnosticLevel::Error)
                .count();
            let warnings = diagnostics
                .iter()
                .filter(|d| d.level == DiagnosticLevel::Warn)
                .count();

            if errors == 0 && warnings == 0 {
                println!("\nConfiguration looks good!");
            } else {
                println!("\nFound {} error(s), {} warning(s)", errors, warnings);
            }
        }
    }
    Ok(())
}
