//! Settings API endpoints
//!
//! GET /settings returns the current analysis settings; PUT /settings
//! replaces them. Runs already in flight keep the settings they started with.

use crate::{ApiResult, AppState};
use axum::{extract::State, routing::get, Json, Router};
use nfc_common::config::AnalysisSettings;

/// GET /settings
pub async fn get_settings(State(state): State<AppState>) -> Json<AnalysisSettings> {
    Json(state.settings.get().await)
}

/// PUT /settings
///
/// **Errors:**
/// - 400 Bad Request: threshold above 100 or empty source set
pub async fn put_settings(
    State(state): State<AppState>,
    Json(settings): Json<AnalysisSettings>,
) -> ApiResult<Json<AnalysisSettings>> {
    let updated = state.settings.replace(settings).await?;
    Ok(Json(updated))
}

/// Build settings routes
pub fn settings_routes() -> Router<AppState> {
    Router::new().route("/settings", get(get_settings).put(put_settings))
}
