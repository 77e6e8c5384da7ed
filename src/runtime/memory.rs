//! In-memory runtime implementation
//!
//! Never touches a container engine. Containers are scripted up front and
//! every call is recorded, so the lifecycle manager can be exercised without
//! docker. Also selectable as `runtime_type = "memory"` for dry runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::types::{
    ComposeProject, ComposeRuntime, InspectedContainer, RuntimeError, RuntimeResult,
};

/// Operation names accepted by [`InMemoryRuntime::fail_on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeOp {
    Build,
    Up,
    Down,
    List,
    Inspect,
}

/// One recorded call against the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCall {
    Build(ComposeProject),
    Up {
        project: ComposeProject,
        detach: bool,
    },
    Down {
        project: ComposeProject,
        remove_volumes: bool,
    },
    List(ComposeProject),
    Inspect(Vec<String>),
}

#[derive(Debug, Default)]
struct Inner {
    containers: Vec<InspectedContainer>,
    failures: HashMap<RuntimeOp, RuntimeError>,
    calls: Vec<RuntimeCall>,
}

/// Scripted in-memory compose runtime.
///
/// Clones share state, so a test can keep a handle while the manager owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRuntime {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: serve `containers` from `list_containers`/`inspect`.
    pub fn with_containers(self, containers: Vec<InspectedContainer>) -> Self {
        self.set_containers(containers);
        self
    }

    /// Replace the served containers (order is the reported order).
    pub fn set_containers(&self, containers: Vec<InspectedContainer>) {
        self.lock().containers = containers;
    }

    /// Make every subsequent `op` call fail with `error`.
    pub fn fail_on(&self, op: RuntimeOp, error: RuntimeError) {
        self.lock().failures.insert(op, error);
    }

    /// Stop failing `op`.
    pub fn clear_failure(&self, op: RuntimeOp) {
        self.lock().failures.remove(&op);
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<RuntimeCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, op: RuntimeOp, call: RuntimeCall) -> RuntimeResult<()> {
        let mut inner = self.lock();
        inner.calls.push(call);
        match inner.failures.get(&op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ComposeRuntime for InMemoryRuntime {
    fn name(&self) -> &str {
        "memory"
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn build(&self, project: &ComposeProject) -> RuntimeResult<()> {
        self.record(RuntimeOp::Build, RuntimeCall::Build(project.clone()))
    }

    async fn up(&self, project: &ComposeProject, detach: bool) -> RuntimeResult<()> {
        self.record(
            RuntimeOp::Up,
            RuntimeCall::Up {
                project: project.clone(),
                detach,
            },
        )
    }

    async fn down(&self, project: &ComposeProject, remove_volumes: bool) -> RuntimeResult<()> {
        self.record(
            RuntimeOp::Down,
            RuntimeCall::Down {
                project: project.clone(),
                remove_volumes,
            },
        )
    }

    async fn list_containers(&self, project: &ComposeProject) -> RuntimeResult<Vec<String>> {
        self.record(RuntimeOp::List, RuntimeCall::List(project.clone()))?;
        Ok(self.lock().containers.iter().map(|c| c.name.clone()).collect())
    }

    async fn inspect(&self, names: &[String]) -> RuntimeResult<Vec<InspectedContainer>> {
        self.record(RuntimeOp::Inspect, RuntimeCall::Inspect(names.to_vec()))?;
        let inner = self.lock();
        names
            .iter()
            .map(|name| {
                inner
                    .containers
                    .iter()
                    .find(|c| &c.name == name)
                    .cloned()
                    .ok_or_else(|| RuntimeError::CommandFailed {
                        command: format!("inspect {}", name),
                        code: Some(1),
                        stderr: format!("Error: No such container: {}", name),
                    })
            })
            .collect()
    }
}
