//! nfc-checker library interface
//!
//! Exposes the analysis pipeline and HTTP router for the binary and for
//! integration testing.

pub mod api;
pub mod config;
pub mod error;
pub mod extractors;
pub mod services;
pub mod synthesis;
pub mod types;
pub mod utils;
pub mod workflow;

pub use crate::error::{AnalysisError, ApiError, ApiResult};

use crate::config::SharedSettings;
use crate::extractors::PatternClaimDetector;
use crate::types::ClaimVerifier;
use crate::workflow::{
    AnalysisOrchestrator, AnalysisRegistry, AnalysisSession, EventBusHighlightSink,
};
use axum::Router;
use chrono::{DateTime, Utc};
use nfc_common::events::EventBus;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Analysis run lifecycle (orchestrator, status registry, highlights)
    pub session: AnalysisSession,
    /// Runtime-editable analysis settings
    pub settings: SharedSettings,
    /// Event bus for SSE broadcasting
    pub event_bus: EventBus,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last error for diagnostic purposes
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    /// Wire the pattern detector, `verifier` and `settings` into a fresh state
    pub fn new(
        verifier: Arc<dyn ClaimVerifier>,
        settings: SharedSettings,
        event_bus: EventBus,
    ) -> Self {
        let orchestrator = AnalysisOrchestrator::new(
            Arc::new(PatternClaimDetector::new()),
            verifier,
            Arc::new(settings.clone()),
        );
        let session = AnalysisSession::new(
            Arc::new(orchestrator),
            AnalysisRegistry::new(),
            event_bus.clone(),
            Arc::new(EventBusHighlightSink::new(event_bus.clone())),
        );

        Self {
            session,
            settings,
            event_bus,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Remember the most recent failure for `/health`
    pub async fn record_error(&self, message: impl Into<String>) {
        *self.last_error.write().await = Some(message.into());
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .merge(api::analysis_routes())
        .merge(api::settings_routes())
        .merge(api::health_routes())
        .route("/events", get(api::event_stream))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
