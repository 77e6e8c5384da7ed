//! Container runtime capability
//!
//! The lifecycle manager only talks to a container engine through the
//! [`ComposeRuntime`] trait. Two backends exist:
//! - Docker: the `docker compose` CLI plugin
//! - Memory: scripted in-process double, used by tests and dry runs

pub mod docker;
pub mod factory;
pub mod memory;
pub mod types;

pub use docker::DockerComposeRuntime;
pub use factory::create_runtime;
pub use memory::{InMemoryRuntime, RuntimeCall, RuntimeOp};
pub use types::{
    ComposeProject, ComposeRuntime, InspectedContainer, RuntimeError, RuntimeResult,
};
