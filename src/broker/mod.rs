//! Broker catalog
//!
//! Maps a context broker name onto the deployment files that bring it up and
//! the container names those files declare. Built once at startup and never
//! mutated afterwards.

pub mod extract;
pub mod registry;

pub use extract::{extract_container_names, CONTAINER_NAME_TOKEN};
pub use registry::{default_descriptor_store, BrokerDescriptor, BrokerRegistry};
