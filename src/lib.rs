//! Broker Manager - context broker deployment lifecycle manager
//!
//! Maps a broker name onto its deployment files, drives a container runtime
//! through initialize → up → down, and rolls per-container health up into
//! one status.

pub mod api;
pub mod broker;
pub mod compose;
pub mod config;
pub mod error;
pub mod health;
pub mod runtime;
pub mod utils;

pub use broker::{BrokerDescriptor, BrokerRegistry};
pub use compose::{LifecycleManager, LifecycleState};
pub use config::Config;
pub use error::{ManagerError, Result};
pub use health::{ContainerStatus, HealthReport, HealthStatus};
pub use runtime::{ComposeRuntime, DockerComposeRuntime, InMemoryRuntime};
