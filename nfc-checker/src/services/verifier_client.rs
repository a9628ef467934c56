//! Verifier Client
//!
//! HTTP client for the claim classification service.
//!
//! # API Reference
//! - `POST <base>/predict` with `{ "claim": "..." }` → `{ "isTrue": bool, "confidence": 0-100 }`
//! - `GET <base>/health` → `{ "status": "healthy", ... }`
//!
//! Every request is one-shot: no retries. Failures surface as `VerifyError`
//! and are turned into fallback verdicts by the orchestrator.

use crate::types::{ClaimVerifier, VerifierResponse, VerifyError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Source label recorded on verdicts from this client
pub const VERIFIER_SOURCE: &str = "Local SVM Model";

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    claim: &'a str,
}

/// Health probe response
#[derive(Debug, Clone, Deserialize)]
pub struct VerifierHealth {
    pub status: String,
    #[serde(default)]
    pub model_loaded: Option<bool>,
}

/// Verifier service client
///
/// # Example
/// ```rust,ignore
/// use nfc_checker::services::VerifierClient;
/// use nfc_checker::types::ClaimVerifier;
///
/// let client = VerifierClient::new("http://localhost:8000", None)?;
/// let response = client.verify("Unemployment fell to 3%").await?;
/// println!("true={} confidence={}", response.is_true, response.confidence);
/// ```
#[derive(Debug, Clone)]
pub struct VerifierClient {
    http_client: Client,
    base_url: String,
}

impl VerifierClient {
    /// Create client for `base_url`
    ///
    /// `timeout` of `None` leaves requests unbounded; a stalled verifier then
    /// holds its run open until the service answers.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, VerifyError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| VerifyError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe `GET <base>/health`
    ///
    /// Succeeds only when the service answers 2xx with `status == "healthy"`.
    pub async fn health_check(&self) -> Result<VerifierHealth, VerifyError> {
        let url = format!("{}/health", self.base_url);
        debug!(url = %url, "Probing verifier health");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| VerifyError::Network(format!("Health request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VerifyError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let health: VerifierHealth = response
            .json()
            .await
            .map_err(|e| VerifyError::Parse(format!("Failed to parse health response: {}", e)))?;

        if health.status != "healthy" {
            return Err(VerifyError::Api {
                status: status.as_u16(),
                body: format!("verifier reports status '{}'", health.status),
            });
        }

        Ok(health)
    }
}

#[async_trait]
impl ClaimVerifier for VerifierClient {
    fn name(&self) -> &'static str {
        VERIFIER_SOURCE
    }

    async fn verify(&self, claim: &str) -> Result<VerifierResponse, VerifyError> {
        let url = format!("{}/predict", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(&PredictRequest { claim })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Verifier request failed");
                VerifyError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Verifier returned error status");
            return Err(VerifyError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let mut prediction: VerifierResponse = response
            .json()
            .await
            .map_err(|e| VerifyError::Parse(e.to_string()))?;

        if !prediction.confidence.is_finite() {
            return Err(VerifyError::Parse(format!(
                "confidence is not a number: {}",
                prediction.confidence
            )));
        }
        prediction.confidence = prediction.confidence.clamp(0.0, 100.0);

        debug!(
            is_true = prediction.is_true,
            confidence = prediction.confidence,
            "Claim verified"
        );

        Ok(prediction)
    }
}
