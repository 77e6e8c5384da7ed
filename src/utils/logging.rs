//! Logging initialization for the broker manager.
//!
//! Supports three formats:
//! - `pretty`: default tracing pretty-print (human-readable, coloured)
//! - `component`: compact single line with target; use the [`log_component!`]
//!   macro to add a `component` field for per-subsystem filtering
//! - `json`: structured JSON lines for log aggregators

use crate::config::{LogFormat, LoggingConfig};
use crate::error::Result;

/// Initialize the global tracing subscriber from config.
///
/// Call this once at startup before any tracing events are emitted.
/// Falls back to `RUST_LOG` env var; if unset, uses `cfg.level`.
/// Events go to stderr (stdout is reserved for command output) unless a
/// JSON log file is configured. Fails only when that file cannot be opened.
pub fn init_logging(cfg: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    match (cfg.format, &cfg.file) {
        (LogFormat::Json, Some(path)) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        (LogFormat::Json, None) => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        (LogFormat::Pretty, _) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .pretty()
                .init();
        }
        // Component-tagged events are emitted via the `log_component!` macro
        // which adds a structured `component` field.
        (LogFormat::Component, _) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .compact()
                .init();
        }
    }
    Ok(())
}

/// Emit a component-tagged tracing event.
///
/// ```
/// # use broker_manager::log_component;
/// log_component!(info, "api", "request received");
/// log_component!(warn, "api", "request failed", status = 409u16);
/// ```
#[macro_export]
macro_rules! log_component {
    ($level:ident, $component:expr, $msg:expr) => {
        tracing::$level!(component = $component, $msg)
    };
    ($level:ident, $component:expr, $msg:expr, $($key:ident = $val:expr),+ $(,)?) => {
        tracing::$level!(component = $component, $($key = $val,)+ $msg)
    };
}
