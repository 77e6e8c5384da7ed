//! API server command handler.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use broker_manager::api::{self, ApiState};

use super::common::{build_manager, load_config};

/// Start the management API, with optional host/port overrides.
pub(crate) async fn cmd_serve(
    config_path: &Path,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let manager = build_manager(&config).await?;
    let state = Arc::new(ApiState::new(manager));

    api::serve(&config.server, state)
        .await
        .with_context(|| {
            format!(
                "API server on {}:{} failed",
                config.server.host, config.server.port
            )
        })
}
