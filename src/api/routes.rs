//! Request handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::ApiState;
use crate::health::HealthReport;
use crate::log_component;
use crate::utils::uptime::format_uptime;

/// Body of `GET /version`.
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionInfo {
    pub doc: String,
    pub git_hash: String,
    pub version: String,
    pub release_date: String,
    pub uptime: String,
}

/// Body of `POST /init`.
#[derive(Debug, Deserialize)]
pub struct InitRequest {
    pub broker: String,
}

/// Body of successful `POST /init` and `POST /clean` responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeploymentResponse {
    pub message: String,
    pub broker: String,
}

pub async fn version(State(state): State<Arc<ApiState>>) -> Json<VersionInfo> {
    log_component!(info, "api", "Request version information");
    Json(VersionInfo {
        doc: "...".to_string(),
        git_hash: option_env!("GIT_HASH").unwrap_or("nogitversion").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        release_date: "no released".to_string(),
        uptime: format_uptime(state.uptime()),
    })
}

/// Bind to the requested broker and bring its deployment up.
pub async fn init(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<InitRequest>,
) -> Result<(StatusCode, Json<DeploymentResponse>), ApiError> {
    log_component!(
        info,
        "api",
        "Request init Context Broker",
        broker = request.broker.as_str()
    );

    let mut manager = state.manager.lock().await;
    manager.initialize(&request.broker)?;
    manager.up().await?;

    Ok((
        StatusCode::CREATED,
        Json(DeploymentResponse {
            message: format!("Context Broker {} deployed", request.broker),
            broker: request.broker,
        }),
    ))
}

/// Bring the bound broker's deployment down.
pub async fn clean(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<DeploymentResponse>, ApiError> {
    log_component!(info, "api", "Request clean Context Broker");

    let manager = state.manager.lock().await;
    manager.down().await?;
    let broker = manager.bound_broker().unwrap_or_default().to_string();

    Ok(Json(DeploymentResponse {
        message: format!("Context Broker {} removed", broker),
        broker,
    }))
}

/// Rollup health of the bound broker.
pub async fn health(State(state): State<Arc<ApiState>>) -> Result<Json<HealthReport>, ApiError> {
    let manager = state.manager.lock().await;
    let report = manager.check_health_status().await?;
    Ok(Json(report))
}
