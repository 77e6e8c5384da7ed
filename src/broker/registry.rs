//! Immutable broker registry.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::extract::extract_container_names;
use crate::error::{ManagerError, Result};

/// Deployment knowledge about one context broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerDescriptor {
    /// Unique broker name (e.g. "Orion-LD")
    pub name: String,
    /// Deployment files in declaration order. Empty means the broker is
    /// recognised but has no working deployment yet.
    pub deployment_files: Vec<PathBuf>,
    /// Container names declared by `deployment_files`, in file then line order
    pub expected_container_names: Vec<String>,
}

impl BrokerDescriptor {
    /// Whether a deployment exists for this broker.
    pub fn is_deployable(&self) -> bool {
        !self.deployment_files.is_empty()
    }
}

/// The brokers known out of the box: only Orion-LD ships a deployment.
pub fn default_descriptor_store() -> BTreeMap<String, Vec<String>> {
    BTreeMap::from([
        (
            "Orion-LD".to_string(),
            vec!["./composes/orionld.yml".to_string()],
        ),
        ("Stellio".to_string(), Vec::new()),
        ("Scorpio".to_string(), Vec::new()),
    ])
}

/// Read-only catalog: broker name to [`BrokerDescriptor`].
#[derive(Debug, Clone, Default)]
pub struct BrokerRegistry {
    brokers: BTreeMap<String, BrokerDescriptor>,
}

impl BrokerRegistry {
    /// Build the registry, reading each deployment file from disk.
    pub fn load<I, P>(store: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<P>)>,
        P: Into<PathBuf>,
    {
        Self::from_sources(store, |path| std::fs::read_to_string(path))
    }

    /// Build the registry with an injected file reader.
    ///
    /// Fails with [`ManagerError::DeploymentFile`] on the first file the
    /// reader cannot produce.
    pub fn from_sources<I, P, F>(store: I, mut read: F) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<P>)>,
        P: Into<PathBuf>,
        F: FnMut(&Path) -> std::io::Result<String>,
    {
        let mut brokers = BTreeMap::new();

        for (name, files) in store {
            let deployment_files: Vec<PathBuf> = files.into_iter().map(Into::into).collect();
            let mut expected_container_names = Vec::new();

            for path in &deployment_files {
                let contents = read(path).map_err(|source| ManagerError::DeploymentFile {
                    path: path.clone(),
                    source,
                })?;
                expected_container_names.extend(extract_container_names(&contents));
            }

            debug!(
                broker = %name,
                files = deployment_files.len(),
                containers = ?expected_container_names,
                "Registered broker"
            );

            brokers.insert(
                name.clone(),
                BrokerDescriptor {
                    name,
                    deployment_files,
                    expected_container_names,
                },
            );
        }

        Ok(Self { brokers })
    }

    /// Look up a broker by exact name.
    pub fn lookup(&self, name: &str) -> Result<&BrokerDescriptor> {
        self.brokers
            .get(name)
            .ok_or_else(|| ManagerError::unknown_broker(name, self.names()))
    }

    /// Registered broker names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.brokers.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BrokerDescriptor> {
        self.brokers.values()
    }

    pub fn len(&self) -> usize {
        self.brokers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brokers.is_empty()
    }
}
