use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::value::RawValue;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::relay::config::RelayConfig;
use crate::relay::upstream::UpstreamClient;

pub const DEFAULT_PORT: u16 = 3001;
pub const HEALTH_PATH: &str = "/health";
pub const SUBMIT_PATH: &str = "/api/submit-order";

/// Shared by every request; never mutated after startup.
pub struct RelayState {
    upstream: UpstreamClient,
}

impl RelayState {
    pub fn new(config: &RelayConfig) -> Result<Self> {
        let upstream =
            UpstreamClient::new(config).context("Failed to build upstream HTTP client")?;
        Ok(Self { upstream })
    }
}

pub fn router(state: Arc<RelayState>) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(SUBMIT_PATH, post(submit_order))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "Relay service is running" }))
}

async fn submit_order(
    State(state): State<Arc<RelayState>>,
    payload: Result<Json<Box<RawValue>>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected order body");
            return rejected(rejection);
        }
    };
    info!(body = %body.get(), "incoming order");

    match state.upstream.forward(&body).await {
        Ok(upstream) => upstream.into_response(),
        Err(err) => {
            error!(error = %err, "failed to forward order");
            err.into_response()
        }
    }
}

/// Same envelope as a forwarding failure, with the extractor's status.
fn rejected(rejection: JsonRejection) -> Response {
    let envelope = json!({
        "error": "Invalid Request",
        "message": rejection.body_text(),
        "details": "The order must be sent as a JSON document with Content-Type: application/json",
    });
    (rejection.status(), Json(envelope)).into_response()
}

/// Serves on an already bound listener until the process is stopped.
pub async fn serve(listener: TcpListener, state: Arc<RelayState>) -> Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Relay server failed")
}

/// Binds `addr` and serves. Configuration must already be loaded; nothing is
/// bound if building the state fails.
pub async fn run(config: &RelayConfig, addr: SocketAddr) -> Result<()> {
    let state = Arc::new(RelayState::new(config)?);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    let local = listener.local_addr()?;

    print_banner(local);
    info!(%local, upstream = %config.upstream_url, "relay listening");

    serve(listener, state).await
}

fn print_banner(addr: SocketAddr) {
    let base = format!("http://{addr}");
    println!();
    println!("  Purchase order relay running");
    println!();
    println!("  Server:        {base}");
    println!("  Health Check:  {base}{HEALTH_PATH}");
    println!("  Submit Order:  {base}{SUBMIT_PATH}");
    println!();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
