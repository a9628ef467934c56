//! Test Helper Utilities
//!
//! Shared utilities for testing nfc-checker: scripted verifiers, failing
//! settings, article builders and a router factory.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use nfc_checker::config::{SettingsProvider, SharedSettings};
use nfc_checker::types::{Article, ClaimVerifier, VerifierResponse, VerifyError};
use nfc_checker::{build_router, AppState};
use nfc_common::config::AnalysisSettings;
use nfc_common::events::EventBus;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

type Script = Box<dyn Fn(&str) -> Result<VerifierResponse, VerifyError> + Send + Sync>;
type Delay = Box<dyn Fn(&str) -> Duration + Send + Sync>;

/// Verifier whose answer is computed from the claim text
pub struct ScriptedVerifier {
    script: Script,
    delay: Option<Delay>,
    calls: AtomicUsize,
}

impl ScriptedVerifier {
    pub fn new(
        script: impl Fn(&str) -> Result<VerifierResponse, VerifyError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            script: Box::new(script),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Every claim gets the same verdict
    pub fn always(is_true: bool, confidence: f64) -> Self {
        Self::new(move |_| Ok(VerifierResponse { is_true, confidence }))
    }

    /// Every call fails with a transport error
    pub fn unreachable() -> Self {
        Self::new(|_| Err(VerifyError::Network("connection refused".to_string())))
    }

    /// Sleep before answering, per claim
    pub fn with_delay(mut self, delay: impl Fn(&str) -> Duration + Send + Sync + 'static) -> Self {
        self.delay = Some(Box::new(delay));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClaimVerifier for ScriptedVerifier {
    fn name(&self) -> &'static str {
        "Scripted Verifier"
    }

    async fn verify(&self, claim: &str) -> Result<VerifierResponse, VerifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = &self.delay {
            tokio::time::sleep(delay(claim)).await;
        }
        (self.script)(claim)
    }
}

/// Settings provider that always fails
pub struct UnavailableSettings;

#[async_trait]
impl SettingsProvider for UnavailableSettings {
    async fn load(&self) -> nfc_common::Result<AnalysisSettings> {
        Err(nfc_common::Error::Internal("settings store unavailable".to_string()))
    }
}

pub fn article(paragraphs: &[&str]) -> Article {
    Article {
        title: "Test Article".to_string(),
        url: "https://news.example.com/test".to_string(),
        paragraphs: paragraphs.iter().map(|p| p.to_string()).collect(),
    }
}

/// Router over `verifier` with default settings; the bus is returned for subscribing
pub fn test_app(verifier: Arc<dyn ClaimVerifier>) -> (Router, EventBus) {
    let event_bus = EventBus::new(100);
    let state = AppState::new(verifier, SharedSettings::default(), event_bus.clone());
    (build_router(state), event_bus)
}
