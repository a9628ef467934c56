//! Runtime settings for nfc-checker
//!
//! The TOML `[analysis]` table seeds the settings; `PUT /settings` replaces
//! them at runtime. Each analysis run reads them exactly once, at entry.

use async_trait::async_trait;
use nfc_common::config::AnalysisSettings;
use nfc_common::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Source of per-run analysis settings
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    /// Current settings
    ///
    /// # Errors
    /// A failure aborts only the run that asked.
    async fn load(&self) -> Result<AnalysisSettings>;
}

/// In-memory settings shared by the service and its runs
#[derive(Debug, Clone, Default)]
pub struct SharedSettings {
    inner: Arc<RwLock<AnalysisSettings>>,
}

impl SharedSettings {
    pub fn new(initial: AnalysisSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    pub async fn get(&self) -> AnalysisSettings {
        self.inner.read().await.clone()
    }

    /// Replace the settings after validating them
    ///
    /// Invalid settings leave the current ones in place.
    pub async fn replace(&self, settings: AnalysisSettings) -> Result<AnalysisSettings> {
        settings.validate()?;

        let mut guard = self.inner.write().await;
        *guard = settings.clone();

        info!(
            confidence_threshold = settings.confidence_threshold,
            sources = settings.sources.len(),
            "Analysis settings updated"
        );
        Ok(settings)
    }
}

#[async_trait]
impl SettingsProvider for SharedSettings {
    async fn load(&self) -> Result<AnalysisSettings> {
        Ok(self.get().await)
    }
}
