//! Liveness of the graph connection.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Always answers 200; `ok` reports whether Neo4j answered a trivial query.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let ok = match state.graph.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Health check failed");
            false
        }
    };

    Json(HealthResponse { ok })
}
