//! Container health aggregation.
//!
//! When a container declares a health check, docker reports a health status
//! next to its normal status:
//! - `starting`: the check has not passed yet (typically the first ~30s)
//! - `healthy`: the check keeps passing at every interval
//! - `unhealthy`: enough consecutive checks failed
//!
//! [`aggregate`] collects those statuses for the containers a broker declares
//! and [`reduce`] folds them into one rollup value.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::runtime::{ComposeProject, ComposeRuntime, InspectedContainer, RuntimeResult};

// ============================================================================
// HealthStatus
// ============================================================================

/// Health of a single container, or the rollup of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Health check has not passed yet.
    Starting,
    /// Health check passing.
    Healthy,
    /// Health check failing.
    Unhealthy,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Starting => "starting",
            HealthStatus::Healthy => "healthy",
            HealthStatus::Unhealthy => "unhealthy",
        }
    }

    /// Parse a runtime-reported health string. Anything unrecognised
    /// (including docker's `none`) counts as "no health check".
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "starting" => Some(HealthStatus::Starting),
            "healthy" => Some(HealthStatus::Healthy),
            "unhealthy" => Some(HealthStatus::Unhealthy),
            _ => None,
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Report types
// ============================================================================

/// Per-container detail of a [`HealthReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerStatus {
    pub name: String,
    /// Free-form runtime status, e.g. "running"
    pub status: String,
    /// `None` when the container declares no health check
    pub health: Option<HealthStatus>,
}

impl From<InspectedContainer> for ContainerStatus {
    fn from(c: InspectedContainer) -> Self {
        Self {
            health: c.health.as_deref().and_then(HealthStatus::parse),
            name: c.name,
            status: c.status,
        }
    }
}

/// Rollup health of a deployment plus the detail it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Overall status
    pub status: HealthStatus,
    /// Containers in the order the runtime reported them
    pub containers: Vec<ContainerStatus>,
}

// ============================================================================
// Reduction
// ============================================================================

/// Fold container statuses into one value.
///
/// Any `unhealthy` wins, then any `starting`; otherwise `healthy`. Containers
/// without a health check, and an empty set, count as healthy.
pub fn reduce(containers: &[ContainerStatus]) -> HealthStatus {
    let has = |wanted: HealthStatus| containers.iter().any(|c| c.health == Some(wanted));

    if has(HealthStatus::Unhealthy) {
        HealthStatus::Unhealthy
    } else if has(HealthStatus::Starting) {
        HealthStatus::Starting
    } else {
        HealthStatus::Healthy
    }
}

/// Query the runtime for the project's containers and build a report.
///
/// Only containers named in `expected` are kept; anything else the runtime
/// lists (e.g. something attached from a shared network) is ignored.
pub async fn aggregate(
    runtime: &dyn ComposeRuntime,
    project: &ComposeProject,
    expected: &[String],
) -> RuntimeResult<HealthReport> {
    let expected: HashSet<&str> = expected.iter().map(String::as_str).collect();

    let scoped: Vec<String> = runtime
        .list_containers(project)
        .await?
        .into_iter()
        .filter(|name| expected.contains(name.as_str()))
        .collect();

    let containers: Vec<ContainerStatus> = runtime
        .inspect(&scoped)
        .await?
        .into_iter()
        .filter(|c| expected.contains(c.name.as_str()))
        .map(ContainerStatus::from)
        .collect();

    let status = reduce(&containers);
    debug!(status = %status, containers = containers.len(), "Aggregated container health");

    Ok(HealthReport { status, containers })
}

// ============================================================================
// Tests
// ============================================================================
