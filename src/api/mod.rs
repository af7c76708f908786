//! HTTP surface of the simulation service
//!
//! - `GET /` service metadata
//! - `GET /health` liveness probe with the engine version
//! - `POST /simulate` build, run and report one simulation
//! - `POST /validate` pre-flight checks, no engine call

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::model::graph::{NodeKind, SimulationRequest};
use crate::simulation::engine::SimulationEngine;
use crate::simulation::results::SimulationOutput;
use crate::simulation::runner::run_simulation;
use crate::simulation::validation::{validate, ValidationReport};

pub const SERVICE_NAME: &str = "SupplyNet Web API";
/// API contract version reported by `GET /`.
pub const SERVICE_VERSION: &str = "2.0.0";

/// Shared, read-only state. Requests never mutate it.
pub struct AppState<E> {
    pub engine: E,
    /// Forwarded to the engine's own logging switch.
    pub engine_logging: bool,
}

pub fn router<E: SimulationEngine>(engine: E, engine_logging: bool) -> Router {
    let state = Arc::new(AppState {
        engine,
        engine_logging,
    });

    Router::new()
        .route("/", get(root))
        .route("/health", get(health::<E>))
        .route("/simulate", post(simulate::<E>))
        .route("/validate", post(validate_network))
        .with_state(state)
}

/// Binds `listen_addr` and serves until the process is stopped.
pub async fn serve<E: SimulationEngine>(
    engine: E,
    engine_logging: bool,
    listen_addr: &str,
) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!(addr = %listen_addr, engine = engine.version(), "API server starting");
    axum::serve(listener, router(engine, engine_logging)).await?;
    Ok(())
}

async fn root() -> impl IntoResponse {
    let kinds: Vec<&str> = NodeKind::ALL.iter().map(NodeKind::as_str).collect();
    Json(json!({
        "message": SERVICE_NAME,
        "status": "running",
        "version": SERVICE_VERSION,
        "nodes_supported": kinds,
    }))
}

async fn health<E: SimulationEngine>(State(state): State<Arc<AppState<E>>>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "engine": state.engine.version(),
    }))
}

#[derive(Debug, Serialize)]
pub struct SimulateResponse {
    pub success: bool,
    #[serde(flatten)]
    pub output: SimulationOutput,
}

async fn simulate<E: SimulationEngine>(
    State(state): State<Arc<AppState<E>>>,
    Json(request): Json<SimulationRequest>,
) -> std::result::Result<Json<SimulateResponse>, SimulationFailure> {
    // The engine blocks; keep it off the async workers.
    let output = tokio::task::spawn_blocking(move || {
        run_simulation(&state.engine, &request, state.engine_logging)
    })
    .await
    .map_err(|err| Error::internal(format!("simulation task failed: {err}")))??;

    Ok(Json(SimulateResponse {
        success: true,
        output,
    }))
}

async fn validate_network(Json(request): Json<SimulationRequest>) -> Json<ValidationReport> {
    Json(validate(&request))
}

/// Any failure inside the simulation pipeline. Rendered as a single 500 whose
/// detail carries only the top-level message; the full error goes to the log.
#[derive(Debug)]
pub struct SimulationFailure(Error);

impl From<Error> for SimulationFailure {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for SimulationFailure {
    fn into_response(self) -> Response {
        error!(error = %self.0, details = ?self.0, "simulation failed");
        let body = Json(json!({ "detail": format!("Simulation failed: {}", self.0) }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
