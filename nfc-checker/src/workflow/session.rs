//! Analysis session lifecycle
//!
//! Wraps an orchestrator run with status bookkeeping and event publication:
//! `begin` marks the run processing and announces it; `execute` runs the
//! pipeline and records the outcome, then emits one highlight per verdict.

use super::highlight::HighlightSink;
use super::orchestrator::AnalysisOrchestrator;
use super::registry::AnalysisRegistry;
use crate::error::AnalysisError;
use crate::types::{AnalysisReport, Article};
use chrono::Utc;
use nfc_common::events::{EventBus, NfcEvent};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// Shared handle for starting and executing analysis runs
#[derive(Clone)]
pub struct AnalysisSession {
    orchestrator: Arc<AnalysisOrchestrator>,
    registry: AnalysisRegistry,
    event_bus: EventBus,
    highlights: Arc<dyn HighlightSink>,
}

impl AnalysisSession {
    pub fn new(
        orchestrator: Arc<AnalysisOrchestrator>,
        registry: AnalysisRegistry,
        event_bus: EventBus,
        highlights: Arc<dyn HighlightSink>,
    ) -> Self {
        Self {
            orchestrator,
            registry,
            event_bus,
            highlights,
        }
    }

    pub fn orchestrator(&self) -> &AnalysisOrchestrator {
        &self.orchestrator
    }

    pub fn registry(&self) -> &AnalysisRegistry {
        &self.registry
    }

    /// Mark the run as processing and announce it
    pub async fn begin(&self, analysis_id: Uuid, article: &Article) {
        self.registry.begin(analysis_id).await;

        info!(
            analysis_id = %analysis_id,
            title = %article.title,
            url = %article.url,
            paragraphs = article.paragraphs.len(),
            "Analysis started"
        );

        self.event_bus.emit_lossy(NfcEvent::AnalysisStarted {
            analysis_id,
            article_title: article.title.clone(),
            article_url: article.url.clone(),
            timestamp: Utc::now(),
        });
    }

    /// Run the pipeline on its own task
    ///
    /// A panic inside the pipeline is recorded as a failed run instead of
    /// leaving the run stuck in `processing`.
    pub async fn execute_isolated(
        &self,
        analysis_id: Uuid,
        article: Article,
    ) -> Result<AnalysisReport, AnalysisError> {
        let session = self.clone();
        let handle = tokio::spawn(async move { session.execute(analysis_id, &article).await });

        match handle.await {
            Ok(result) => result,
            Err(join_error) => {
                let e = AnalysisError::Internal(join_error.to_string());
                self.record_failure(analysis_id, &e).await;
                Err(e)
            }
        }
    }

    /// Run the pipeline and record the outcome under `analysis_id`
    pub async fn execute(
        &self,
        analysis_id: Uuid,
        article: &Article,
    ) -> Result<AnalysisReport, AnalysisError> {
        match self.orchestrator.run(article).await {
            Ok(report) => {
                self.registry.complete(analysis_id, report.clone()).await;

                self.event_bus.emit_lossy(NfcEvent::AnalysisCompleted {
                    analysis_id,
                    overall_accuracy: report.overall_accuracy,
                    claim_count: report.facts.len(),
                    timestamp: Utc::now(),
                });

                for verdict in &report.facts {
                    self.highlights.highlight(analysis_id, verdict.highlight());
                }

                info!(
                    analysis_id = %analysis_id,
                    overall_accuracy = report.overall_accuracy,
                    "Analysis completed"
                );
                Ok(report)
            }
            Err(e) => {
                self.record_failure(analysis_id, &e).await;
                Err(e)
            }
        }
    }

    async fn record_failure(&self, analysis_id: Uuid, e: &AnalysisError) {
        error!(analysis_id = %analysis_id, error = %e, "Analysis failed");

        self.registry.fail(analysis_id, e.to_string()).await;
        self.event_bus.emit_lossy(NfcEvent::AnalysisFailed {
            analysis_id,
            message: e.to_string(),
            timestamp: Utc::now(),
        });
    }
}
