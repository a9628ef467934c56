//! Health check endpoint
//!
//! Reports build identity, uptime, which verifier backs the pipeline and how
//! many background analyses are still running. The verifier itself is not
//! probed here; `nfc-checker verifier-health` does that.

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::AppState;

const MODULE_NAME: &str = "nfc-checker";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    /// Short git hash recorded by build.rs
    pub git_hash: String,
    pub uptime_seconds: u64,
    /// Source label of the configured verifier
    pub verifier: String,
    /// Runs started through `POST /analyses` that have not finished
    pub analyses_in_flight: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl HealthResponse {
    async fn collect(state: &AppState) -> Self {
        let uptime_seconds = Utc::now()
            .signed_duration_since(state.startup_time)
            .num_seconds()
            .max(0) as u64;

        Self {
            status: "ok".to_string(),
            module: MODULE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            git_hash: env!("GIT_HASH").to_string(),
            uptime_seconds,
            verifier: state.session.orchestrator().verifier_name().to_string(),
            analyses_in_flight: state.session.registry().in_flight().await,
            last_error: state.last_error.read().await.clone(),
        }
    }
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::collect(&state).await)
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
