//! Analysis API handlers
//!
//! POST /analyses, GET /analyses/{id}/status, POST /analyze, POST /claims/detect

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    error::ApiResult,
    types::{AnalysisReport, Article, Claim},
    workflow::AnalysisStatus,
    AppState,
};

/// POST /analyses request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAnalysisRequest {
    #[serde(default)]
    pub article: Article,
    /// Caller-chosen run id (e.g., one per browser tab); generated when absent
    #[serde(default)]
    pub analysis_id: Option<Uuid>,
}

/// POST /analyses response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAnalysisResponse {
    pub analysis_id: Uuid,
    pub status: String,
}

/// POST /claims/detect request
#[derive(Debug, Deserialize)]
pub struct DetectClaimsRequest {
    #[serde(default)]
    pub paragraphs: Vec<String>,
}

/// POST /claims/detect response
#[derive(Debug, Serialize, Deserialize)]
pub struct DetectClaimsResponse {
    pub claims: Vec<Claim>,
}

/// POST /analyses
///
/// Start an analysis in the background. Returns 202 Accepted with the run id;
/// poll `/analyses/{id}/status` or listen on `/events` for the outcome.
pub async fn start_analysis(
    State(state): State<AppState>,
    Json(request): Json<StartAnalysisRequest>,
) -> (StatusCode, Json<StartAnalysisResponse>) {
    let analysis_id = request.analysis_id.unwrap_or_else(Uuid::new_v4);
    let article = request.article;

    state.session.begin(analysis_id, &article).await;

    let state_clone = state.clone();
    tokio::spawn(async move {
        info!(analysis_id = %analysis_id, "Background analysis task started");

        if let Err(e) = state_clone
            .session
            .execute_isolated(analysis_id, article)
            .await
        {
            error!(
                analysis_id = %analysis_id,
                error = %e,
                "Background analysis task failed"
            );
            state_clone.record_error(e.to_string()).await;
        }
    });

    (
        StatusCode::ACCEPTED,
        Json(StartAnalysisResponse {
            analysis_id,
            status: "processing".to_string(),
        }),
    )
}

/// GET /analyses/{analysis_id}/status
///
/// Unknown ids report `not_started`.
pub async fn get_analysis_status(
    State(state): State<AppState>,
    Path(analysis_id): Path<Uuid>,
) -> Json<AnalysisStatus> {
    Json(state.session.registry().status(analysis_id).await)
}

/// POST /analyze
///
/// Synchronous analysis; responds with the finished report.
pub async fn analyze(
    State(state): State<AppState>,
    Json(article): Json<Article>,
) -> ApiResult<Json<AnalysisReport>> {
    let analysis_id = Uuid::new_v4();
    state.session.begin(analysis_id, &article).await;

    match state.session.execute_isolated(analysis_id, article).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            state.record_error(e.to_string()).await;
            Err(e.into())
        }
    }
}

/// POST /claims/detect
///
/// Claim detection only; nothing is sent to the verifier.
pub async fn detect_claims(
    State(state): State<AppState>,
    Json(request): Json<DetectClaimsRequest>,
) -> Json<DetectClaimsResponse> {
    let claims = state
        .session
        .orchestrator()
        .detector()
        .detect(&request.paragraphs);
    Json(DetectClaimsResponse { claims })
}

/// Build analysis routes
pub fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/analyses", post(start_analysis))
        .route("/analyses/:analysis_id/status", get(get_analysis_status))
        .route("/analyze", post(analyze))
        .route("/claims/detect", post(detect_claims))
}
