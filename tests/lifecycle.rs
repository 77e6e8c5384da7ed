//! Integration tests for the lifecycle manager.
//!
//! Everything runs against `InMemoryRuntime` or a mockall double; no
//! container engine is needed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::always;

use broker_manager::compose::{LifecycleManager, LifecycleState};
use broker_manager::health::HealthStatus;
use broker_manager::runtime::{
    ComposeProject, ComposeRuntime, InMemoryRuntime, InspectedContainer, RuntimeCall,
    RuntimeError, RuntimeResult,
};
use broker_manager::{BrokerRegistry, ManagerError};

mock! {
    pub Runtime {}

    #[async_trait]
    impl ComposeRuntime for Runtime {
        fn name(&self) -> &str;
        async fn is_available(&self) -> bool;
        async fn build(&self, project: &ComposeProject) -> RuntimeResult<()>;
        async fn up(&self, project: &ComposeProject, detach: bool) -> RuntimeResult<()>;
        async fn down(&self, project: &ComposeProject, remove_volumes: bool) -> RuntimeResult<()>;
        async fn list_containers(&self, project: &ComposeProject) -> RuntimeResult<Vec<String>>;
        async fn inspect(&self, names: &[String]) -> RuntimeResult<Vec<InspectedContainer>>;
    }
}

const ORION_COMPOSE: &str = "\
services:
  orion:
    image: fiware/orion-ld
    container_name: orion-ld
    healthcheck:
      test: curl --fail -s http://localhost:1026/version
  mongo-db:
    image: mongo:4.4
      container_name:mongo-db  
";

/// Registry `{ "Orion-LD": ["a.yml"], "Stellio": [] }` backed by a temp dir.
fn registry(dir: &Path) -> Arc<BrokerRegistry> {
    let file = dir.join("a.yml");
    std::fs::write(&file, ORION_COMPOSE).unwrap();
    Arc::new(
        BrokerRegistry::load(vec![
            ("Orion-LD".to_string(), vec![file]),
            ("Stellio".to_string(), Vec::new()),
        ])
        .unwrap(),
    )
}

fn memory_manager(dir: &Path, runtime: &InMemoryRuntime) -> LifecycleManager {
    LifecycleManager::new(registry(dir), Arc::new(runtime.clone()))
}

// ============================================================================
// Registry / extraction
// ============================================================================

#[test]
fn test_registry_extracts_names_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(dir.path());
    assert_eq!(
        registry
            .lookup("Orion-LD")
            .unwrap()
            .expected_container_names,
        vec!["orion-ld", "mongo-db"]
    );
}

// ============================================================================
// initialize
// ============================================================================

#[test]
fn test_unknown_names_never_mutate_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut mgr = memory_manager(dir.path(), &InMemoryRuntime::new());

    for name in ["Ghost", "", "orion-ld", "Orion-LD ", "Scorpio", "ORION-LD"] {
        let err = mgr.initialize(name).unwrap_err();
        assert_eq!(err.kind(), "unknown_broker", "name {:?}", name);
        assert_eq!(err.data(), Some(name));
        assert_eq!(mgr.state(), &LifecycleState::Uninitialized);
    }
}

#[test]
fn test_empty_deployment_is_unimplemented() {
    let dir = tempfile::tempdir().unwrap();
    let mut mgr = memory_manager(dir.path(), &InMemoryRuntime::new());

    let err = mgr.initialize("Stellio").unwrap_err();
    assert!(matches!(err, ManagerError::Unimplemented { .. }));
    assert_eq!(err.data(), Some("Stellio"));
    assert_eq!(mgr.state(), &LifecycleState::Uninitialized);
}

#[test]
fn test_rebind_does_not_touch_runtime() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = InMemoryRuntime::new();
    let mut mgr = memory_manager(dir.path(), &runtime);

    mgr.initialize("Orion-LD").unwrap();
    mgr.initialize("Orion-LD").unwrap();
    assert!(runtime.calls().is_empty());
    assert_eq!(mgr.bound_broker(), Some("Orion-LD"));
}

// ============================================================================
// up / down / health preconditions
// ============================================================================

#[tokio::test]
async fn test_fresh_manager_rejects_state_dependent_operations() {
    let dir = tempfile::tempdir().unwrap();
    let mgr = memory_manager(dir.path(), &InMemoryRuntime::new());

    let errs = vec![
        mgr.up().await.unwrap_err(),
        mgr.down().await.unwrap_err(),
        mgr.check_health_status().await.unwrap_err(),
    ];
    for err in errs {
        assert!(matches!(err, ManagerError::ComposeInitialization { .. }));
        assert_eq!(err.data(), Some(""));
    }
}

#[tokio::test]
async fn test_scenario_initialize_then_up() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = InMemoryRuntime::new();
    let mut mgr = memory_manager(dir.path(), &runtime);

    assert!(matches!(
        mgr.initialize("Stellio"),
        Err(ManagerError::Unimplemented { .. })
    ));
    assert!(matches!(
        mgr.initialize("Ghost"),
        Err(ManagerError::UnknownBroker { .. })
    ));

    mgr.initialize("Orion-LD").unwrap();
    mgr.up().await.unwrap();
    mgr.down().await.unwrap();
    mgr.up().await.unwrap();

    assert_eq!(mgr.bound_broker(), Some("Orion-LD"));
    assert_eq!(runtime.calls().len(), 5);
    assert!(matches!(runtime.calls()[1], RuntimeCall::Up { detach: true, .. }));
}

#[tokio::test]
async fn test_session_uses_configured_env_file() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = InMemoryRuntime::new();
    let mut mgr = memory_manager(dir.path(), &runtime).with_env_file("/srv/composes/.env");

    mgr.initialize("Orion-LD").unwrap();
    mgr.down().await.unwrap();

    match &runtime.calls()[0] {
        RuntimeCall::Down {
            project,
            remove_volumes,
        } => {
            assert!(*remove_volumes);
            assert_eq!(project.env_file, PathBuf::from("/srv/composes/.env"));
            assert_eq!(project.files, vec![dir.path().join("a.yml")]);
        }
        other => panic!("unexpected call: {other:?}"),
    }
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_excludes_foreign_containers() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = InMemoryRuntime::new().with_containers(vec![
        InspectedContainer::new("traefik", "running", Some("unhealthy")),
        InspectedContainer::new("mongo-db", "running", Some("healthy")),
        InspectedContainer::new("orion-ld", "running", Some("healthy")),
    ]);
    let mut mgr = memory_manager(dir.path(), &runtime);
    mgr.initialize("Orion-LD").unwrap();

    let report = mgr.check_health_status().await.unwrap();
    assert_eq!(report.status, HealthStatus::Healthy);
    let names: Vec<&str> = report.containers.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["mongo-db", "orion-ld"]);
}

#[tokio::test]
async fn test_health_follows_container_transitions() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = InMemoryRuntime::new();
    let mut mgr = memory_manager(dir.path(), &runtime);
    mgr.initialize("Orion-LD").unwrap();

    let cases = [
        (Some("starting"), Some("healthy"), HealthStatus::Starting),
        (Some("healthy"), None, HealthStatus::Healthy),
        (Some("unhealthy"), Some("starting"), HealthStatus::Unhealthy),
        (Some("healthy"), Some("unhealthy"), HealthStatus::Unhealthy),
    ];
    for (orion, mongo, expected) in cases {
        runtime.set_containers(vec![
            InspectedContainer::new("orion-ld", "running", orion),
            InspectedContainer::new("mongo-db", "running", mongo),
        ]);
        let report = mgr.check_health_status().await.unwrap();
        assert_eq!(report.status, expected, "orion={orion:?} mongo={mongo:?}");
    }
}

// ============================================================================
// Runtime error propagation (mockall)
// ============================================================================

#[tokio::test]
async fn test_build_failure_propagates_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let failure = RuntimeError::CommandFailed {
        command: "docker compose build".to_string(),
        code: Some(17),
        stderr: "pull access denied".to_string(),
    };

    let mut mock = MockRuntime::new();
    let returned = failure.clone();
    mock.expect_build()
        .with(always())
        .times(1)
        .returning(move |_| Err(returned.clone()));
    mock.expect_up().never();

    let mut mgr = LifecycleManager::new(registry(dir.path()), Arc::new(mock));
    mgr.initialize("Orion-LD").unwrap();

    match mgr.up().await.unwrap_err() {
        ManagerError::Runtime(err) => assert_eq!(err, failure),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(mgr.bound_broker(), Some("Orion-LD"));
}

#[tokio::test]
async fn test_up_detaches_and_down_removes_volumes() {
    let dir = tempfile::tempdir().unwrap();

    let mut mock = MockRuntime::new();
    mock.expect_build().times(1).returning(|_| Ok(()));
    mock.expect_up()
        .withf(|_, detach| *detach)
        .times(1)
        .returning(|_, _| Ok(()));
    mock.expect_down()
        .withf(|project, remove_volumes| *remove_volumes && project.files.len() == 1)
        .times(1)
        .returning(|_, _| Ok(()));

    let mut mgr = LifecycleManager::new(registry(dir.path()), Arc::new(mock));
    mgr.initialize("Orion-LD").unwrap();
    mgr.up().await.unwrap();
    mgr.down().await.unwrap();
}

#[tokio::test]
async fn test_inspect_failure_propagates_from_health() {
    let dir = tempfile::tempdir().unwrap();

    let mut mock = MockRuntime::new();
    mock.expect_list_containers()
        .times(1)
        .returning(|_| Ok(vec!["orion-ld".to_string()]));
    mock.expect_inspect()
        .withf(|names| names.len() == 1 && names[0] == "orion-ld")
        .times(1)
        .returning(|_| Err(RuntimeError::Parse("truncated".to_string())));

    let mut mgr = LifecycleManager::new(registry(dir.path()), Arc::new(mock));
    mgr.initialize("Orion-LD").unwrap();

    let err = mgr.check_health_status().await.unwrap_err();
    assert!(matches!(err, ManagerError::Runtime(RuntimeError::Parse(_))));
}
