//! Analysis run status registry
//!
//! Status surface polled by callers while a run is in flight. Entries live in
//! memory only and are lost on restart.

use crate::types::AnalysisReport;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Current state of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisStatus {
    NotStarted,
    Processing,
    Complete { results: AnalysisReport },
    Error { message: String },
}

/// Shared run-id → status map
#[derive(Debug, Clone, Default)]
pub struct AnalysisRegistry {
    runs: Arc<RwLock<HashMap<Uuid, AnalysisStatus>>>,
}

impl AnalysisRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark run as processing, replacing any earlier status under this id
    pub async fn begin(&self, analysis_id: Uuid) {
        self.runs
            .write()
            .await
            .insert(analysis_id, AnalysisStatus::Processing);
    }

    pub async fn complete(&self, analysis_id: Uuid, report: AnalysisReport) {
        self.runs
            .write()
            .await
            .insert(analysis_id, AnalysisStatus::Complete { results: report });
    }

    pub async fn fail(&self, analysis_id: Uuid, message: impl Into<String>) {
        self.runs.write().await.insert(
            analysis_id,
            AnalysisStatus::Error {
                message: message.into(),
            },
        );
    }

    /// Status for `analysis_id`; unknown ids are `NotStarted`
    pub async fn status(&self, analysis_id: Uuid) -> AnalysisStatus {
        self.runs
            .read()
            .await
            .get(&analysis_id)
            .cloned()
            .unwrap_or(AnalysisStatus::NotStarted)
    }

    /// Number of runs still processing
    pub async fn in_flight(&self) -> usize {
        self.runs
            .read()
            .await
            .values()
            .filter(|status| matches!(status, AnalysisStatus::Processing))
            .count()
    }
}
