//! Docker Compose runtime implementation
//!
//! Drives the `docker compose` CLI plugin for project-level operations and
//! `docker container inspect` for per-container state.

use async_trait::async_trait;
use serde::Deserialize;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use super::types::{
    ComposeProject, ComposeRuntime, InspectedContainer, RuntimeError, RuntimeResult,
};

/// Compose runtime backed by the docker CLI
#[derive(Debug, Clone)]
pub struct DockerComposeRuntime {
    /// Path or name of the docker binary
    binary: String,
}

impl DockerComposeRuntime {
    /// Create a runtime that invokes `binary` (e.g. "docker", "/usr/local/bin/docker")
    pub fn new(binary: &str) -> Self {
        Self {
            binary: binary.to_string(),
        }
    }

    /// Leading `compose -f .. --env-file ..` arguments for a project.
    fn project_args(project: &ComposeProject) -> Vec<String> {
        let mut args = vec!["compose".to_string()];
        for file in &project.files {
            args.push("-f".to_string());
            args.push(file.to_string_lossy().to_string());
        }
        args.push("--env-file".to_string());
        args.push(project.env_file.to_string_lossy().to_string());
        args
    }

    fn build_args(project: &ComposeProject) -> Vec<String> {
        let mut args = Self::project_args(project);
        args.push("build".to_string());
        args
    }

    fn up_args(project: &ComposeProject, detach: bool) -> Vec<String> {
        let mut args = Self::project_args(project);
        args.push("up".to_string());
        if detach {
            args.push("--detach".to_string());
        }
        args
    }

    fn down_args(project: &ComposeProject, remove_volumes: bool) -> Vec<String> {
        let mut args = Self::project_args(project);
        args.push("down".to_string());
        if remove_volumes {
            args.push("--volumes".to_string());
        }
        args
    }

    fn ps_args(project: &ComposeProject) -> Vec<String> {
        let mut args = Self::project_args(project);
        args.push("ps".to_string());
        args.push("--format".to_string());
        args.push("{{.Name}}".to_string());
        args
    }

    /// Run the docker binary and return its stdout on success.
    async fn run(&self, args: &[String]) -> RuntimeResult<String> {
        let rendered = format!("{} {}", self.binary, args.join(" "));
        debug!(command = %rendered, "Running container runtime command");

        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| RuntimeError::ExecutionFailed(format!("{}: {}", rendered, e)))?;

        if !output.status.success() {
            return Err(RuntimeError::CommandFailed {
                command: rendered,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl Default for DockerComposeRuntime {
    fn default() -> Self {
        Self::new("docker")
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InspectEntry {
    name: String,
    state: InspectState,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InspectState {
    status: String,
    #[serde(default)]
    health: Option<InspectHealth>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InspectHealth {
    status: String,
}

/// Parse the JSON array printed by `docker container inspect`.
fn parse_inspect(raw: &str) -> RuntimeResult<Vec<InspectedContainer>> {
    let entries: Vec<InspectEntry> =
        serde_json::from_str(raw).map_err(|e| RuntimeError::Parse(e.to_string()))?;

    Ok(entries
        .into_iter()
        .map(|entry| InspectedContainer {
            name: entry.name.trim_start_matches('/').to_string(),
            status: entry.state.status,
            health: entry.state.health.map(|h| h.status),
        })
        .collect())
}

/// One container name per non-empty line of `compose ps --format {{.Name}}`.
fn parse_ps(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl ComposeRuntime for DockerComposeRuntime {
    fn name(&self) -> &str {
        "docker"
    }

    async fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .args(["info"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    async fn build(&self, project: &ComposeProject) -> RuntimeResult<()> {
        self.run(&Self::build_args(project)).await.map(|_| ())
    }

    async fn up(&self, project: &ComposeProject, detach: bool) -> RuntimeResult<()> {
        self.run(&Self::up_args(project, detach)).await.map(|_| ())
    }

    async fn down(&self, project: &ComposeProject, remove_volumes: bool) -> RuntimeResult<()> {
        self.run(&Self::down_args(project, remove_volumes))
            .await
            .map(|_| ())
    }

    async fn list_containers(&self, project: &ComposeProject) -> RuntimeResult<Vec<String>> {
        let stdout = self.run(&Self::ps_args(project)).await?;
        Ok(parse_ps(&stdout))
    }

    async fn inspect(&self, names: &[String]) -> RuntimeResult<Vec<InspectedContainer>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let mut args = vec!["container".to_string(), "inspect".to_string()];
        args.extend(names.iter().cloned());
        let stdout = self.run(&args).await?;
        parse_inspect(&stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn project() -> ComposeProject {
        ComposeProject::new(
            vec![PathBuf::from("./composes/orionld.yml"), PathBuf::from("b.yml")],
            "./composes/.env",
        )
    }

    #[test]
    fn test_docker_runtime_creation() {
        let runtime = DockerComposeRuntime::new("/usr/bin/docker");
        assert_eq!(runtime.binary, "/usr/bin/docker");
        assert_eq!(runtime.name(), "docker");
    }

    #[test]
    fn test_docker_runtime_default() {
        let runtime = DockerComposeRuntime::default();
        assert_eq!(runtime.binary, "docker");
    }

    #[test]
    fn test_project_args_keep_file_order() {
        let args = DockerComposeRuntime::project_args(&project());
        assert_eq!(
            args,
            vec![
                "compose",
                "-f",
                "./composes/orionld.yml",
                "-f",
                "b.yml",
                "--env-file",
                "./composes/.env"
            ]
        );
    }

    #[test]
    fn test_up_and_down_flags() {
        let up = DockerComposeRuntime::up_args(&project(), true);
        assert_eq!(&up[up.len() - 2..], ["up", "--detach"]);

        let up = DockerComposeRuntime::up_args(&project(), false);
        assert_eq!(up.last().map(String::as_str), Some("up"));

        let down = DockerComposeRuntime::down_args(&project(), true);
        assert_eq!(&down[down.len() - 2..], ["down", "--volumes"]);

        let build = DockerComposeRuntime::build_args(&project());
        assert_eq!(build.last().map(String::as_str), Some("build"));
    }

    #[test]
    fn test_parse_ps_skips_blank_lines() {
        assert_eq!(
            parse_ps("orion-ld\n\n  mongo-db  \n"),
            vec!["orion-ld".to_string(), "mongo-db".to_string()]
        );
    }

    #[test]
    fn test_parse_inspect_with_and_without_health() {
        let raw = r#"[
            {"Name": "/orion-ld", "State": {"Status": "running", "Health": {"Status": "healthy", "FailingStreak": 0}}},
            {"Name": "/mongo-db", "State": {"Status": "running"}}
        ]"#;
        let parsed = parse_inspect(raw).unwrap();
        assert_eq!(
            parsed,
            vec![
                InspectedContainer::new("orion-ld", "running", Some("healthy")),
                InspectedContainer::new("mongo-db", "running", None),
            ]
        );
    }

    #[test]
    fn test_parse_inspect_rejects_garbage() {
        let err = parse_inspect("not json").unwrap_err();
        assert!(matches!(err, RuntimeError::Parse(_)));
    }

    #[tokio::test]
    async fn test_inspect_empty_names_skips_runtime() {
        let runtime = DockerComposeRuntime::new("/nonexistent/docker");
        assert!(runtime.inspect(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_binary_is_execution_failure() {
        let runtime = DockerComposeRuntime::new("/nonexistent/docker");
        assert!(!runtime.is_available().await);
        let err = runtime.build(&project()).await.unwrap_err();
        assert!(matches!(err, RuntimeError::ExecutionFailed(_)));
    }

    // Integration tests (only run if Docker is available)
    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_docker_runtime_available() {
        let runtime = DockerComposeRuntime::default();
        assert!(runtime.is_available().await);
    }
}
