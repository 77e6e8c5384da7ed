//! HTTP management API
//!
//! Thin layer over the [`LifecycleManager`]:
//! - `GET /version`: build information and uptime
//! - `POST /init`: bind to a broker (`{"broker": "Orion-LD"}`) and deploy it
//! - `POST /clean`: bring the bound deployment down
//! - `GET /health`: rollup container health of the bound broker
//!
//! The manager sits behind a `tokio::sync::Mutex`, so requests touching it
//! are processed one at a time.

pub mod error;
pub mod headers;
pub mod routes;

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::compose::LifecycleManager;
use crate::config::ServerConfig;

pub use error::ApiError;

/// Shared state handed to every handler.
pub struct ApiState {
    pub manager: Mutex<LifecycleManager>,
    started: Instant,
}

impl ApiState {
    pub fn new(manager: LifecycleManager) -> Self {
        Self {
            manager: Mutex::new(manager),
            started: Instant::now(),
        }
    }

    /// Time since the state was created.
    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Build the router with security headers and request tracing.
pub fn router(state: Arc<ApiState>) -> Router {
    let router = Router::new()
        .route("/version", get(routes::version))
        .route("/init", post(routes::init))
        .route("/clean", post(routes::clean))
        .route("/health", get(routes::health))
        .with_state(state);

    headers::with_security_headers(router).layer(TraceLayer::new_for_http())
}

/// Serve the API until Ctrl-C.
pub async fn serve(config: &ServerConfig, state: Arc<ApiState>) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Broker management API listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for Ctrl-C; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
