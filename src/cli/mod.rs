//! CLI module — command parsing and dispatch
//!
//! All CLI logic lives here. `main.rs` calls `cli::run()`.

pub mod common;
pub mod config;
pub mod deploy;
pub mod serve;

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "broker-manager")]
#[command(version)]
#[command(about = "Context broker deployment lifecycle manager", long_about = None)]
struct Cli {
    /// Config file (default: ./common/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the management HTTP API
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },
    /// List known brokers and their deployment files
    Brokers,
    /// Build and start a broker deployment
    Up {
        /// Broker name (e.g. "Orion-LD")
        broker: String,
    },
    /// Stop a broker deployment and remove its volumes
    Down {
        /// Broker name (e.g. "Orion-LD")
        broker: String,
    },
    /// Print the rollup container health of a broker deployment as JSON
    Health {
        /// Broker name (e.g. "Orion-LD")
        broker: String,
    },
    /// Validate configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Check configuration for errors and warnings
    Check,
}

/// Entry point for the CLI — called from main().
pub async fn run() -> Result<()> {
    // Pick up BROKER_MANAGER_* overrides from a local .env, if any.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(broker_manager::config::Config::path);

    // Respect the logging settings when the config is readable; fall back to
    // defaults otherwise so `config check` can still report the problem.
    let logging_cfg = broker_manager::config::Config::load_from_path(&config_path)
        .map(|c| c.logging)
        .unwrap_or_default();
    broker_manager::utils::logging::init_logging(&logging_cfg)?;

    match cli.command {
        None => {
            let mut cmd = Cli::command();
            cmd.print_help()?;
            println!();
        }
        Some(Commands::Version) => {
            cmd_version();
        }
        Some(Commands::Serve { host, port }) => {
            serve::cmd_serve(&config_path, host, port).await?;
        }
        Some(Commands::Brokers) => {
            deploy::cmd_brokers(&config_path)?;
        }
        Some(Commands::Up { broker }) => {
            deploy::cmd_up(&config_path, &broker).await?;
        }
        Some(Commands::Down { broker }) => {
            deploy::cmd_down(&config_path, &broker).await?;
        }
        Some(Commands::Health { broker }) => {
            deploy::cmd_health(&config_path, &broker).await?;
        }
        Some(Commands::Config { action }) => {
            config::cmd_config(&config_path, action)?;
        }
    }

    Ok(())
}

/// Display version information
fn cmd_version() {
    println!("broker-manager {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Context broker deployment lifecycle manager");
}
