//! Core Types and Trait Definitions for nfc-checker
//!
//! Defines the data model of one analysis run and the seams between the
//! pipeline stages:
//! - **Detection:** `ClaimDetector` turns paragraphs into claims
//! - **Verification:** `ClaimVerifier` judges one claim (remote, opaque)
//! - **Synthesis:** corrections and evidence for false numeric claims
//!
//! All wire-facing types serialize in camelCase to match the message shapes
//! the browser extension exchanges.

use async_trait::async_trait;
use nfc_common::events::FactHighlight;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use nfc_common::events::Correction;

// ============================================================================
// Common Types
// ============================================================================

/// Article submitted for analysis
///
/// Immutable input to a single analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub url: String,
    /// Paragraph texts in page order
    pub paragraphs: Vec<String>,
}

/// Sentence selected as containing a checkable assertion
///
/// Unique by exact trimmed text within one analysis run.
pub type Claim = String;

/// Lexical category of a numeric substring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueKind {
    Currency,
    Percentage,
    NumberWithUnit,
    Date,
    StandaloneNumber,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Currency => "currency",
            ValueKind::Percentage => "percentage",
            ValueKind::NumberWithUnit => "number-with-unit",
            ValueKind::Date => "date",
            ValueKind::StandaloneNumber => "standalone-number",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric substring found in a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedValue {
    pub kind: ValueKind,
    /// Matched text exactly as it appears in the claim
    pub raw_text: String,
    /// Byte offset of the match in the claim
    pub position: usize,
    /// Byte length of the match
    pub length: usize,
}

/// Citation attached to a corrected claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub url: String,
    pub evidence: String,
}

/// Outcome of checking one claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub claim: Claim,
    pub is_true: bool,
    /// True when confidence is below the configured threshold
    pub is_uncertain: bool,
    /// Verifier confidence (0-100)
    pub confidence: f64,
    pub explanation: String,
    pub sources: Vec<String>,
    pub correction: Option<Correction>,
    #[serde(rename = "sourceURL")]
    pub source_url: String,
    pub evidence_text: String,
}

impl Verdict {
    /// Highlight instruction for the presentation layer
    pub fn highlight(&self) -> FactHighlight {
        FactHighlight {
            text: self.claim.clone(),
            is_factual: self.is_true,
            correction: self.correction.clone(),
            source_url: self.source_url.clone(),
            evidence_text: self.evidence_text.clone(),
        }
    }
}

/// Final per-article report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub article_title: String,
    pub article_url: String,
    /// Share of claims judged true, 0-100 (100 when there are no claims)
    pub overall_accuracy: u8,
    pub summary_sentence: String,
    /// Verdicts in claim order
    pub facts: Vec<Verdict>,
}

// ============================================================================
// Detection
// ============================================================================

/// Claim detection seam
///
/// The shipped implementation is lexical (`PatternClaimDetector`); a model-
/// backed detector can be dropped in without touching the orchestrator.
pub trait ClaimDetector: Send + Sync {
    /// Detector name for logging
    fn name(&self) -> &'static str;

    /// Select checkable claims from paragraphs, in first-seen order
    fn detect(&self, paragraphs: &[String]) -> Vec<Claim>;
}

// ============================================================================
// Verification
// ============================================================================

/// Successful verifier response
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifierResponse {
    pub is_true: bool,
    /// Confidence 0-100
    pub confidence: f64,
}

/// Remote claim classifier
///
/// Treated as an opaque black box returning a verdict and a confidence.
///
/// # Example
/// ```rust,ignore
/// use nfc_checker::types::{ClaimVerifier, VerifierResponse, VerifyError};
///
/// struct AlwaysTrue;
///
/// #[async_trait::async_trait]
/// impl ClaimVerifier for AlwaysTrue {
///     fn name(&self) -> &'static str { "AlwaysTrue" }
///
///     async fn verify(&self, _claim: &str) -> Result<VerifierResponse, VerifyError> {
///         Ok(VerifierResponse { is_true: true, confidence: 99.0 })
///     }
/// }
/// ```
#[async_trait]
pub trait ClaimVerifier: Send + Sync {
    /// Source label recorded on verdicts this verifier produced
    fn name(&self) -> &'static str;

    /// Judge one claim
    ///
    /// # Errors
    /// Any `VerifyError` is recoverable: the caller substitutes a fallback verdict.
    async fn verify(&self, claim: &str) -> Result<VerifierResponse, VerifyError>;
}

/// Verification error
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Transport failure (connection refused, reset, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Verifier answered with a non-success HTTP status
    #[error("Verifier returned {status}: {body}")]
    Api { status: u16, body: String },

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kind_wire_names() {
        assert_eq!(
            serde_json::to_value(ValueKind::NumberWithUnit).unwrap(),
            "number-with-unit"
        );
        assert_eq!(
            serde_json::to_value(ValueKind::StandaloneNumber).unwrap(),
            "standalone-number"
        );
        assert_eq!(ValueKind::Currency.to_string(), "currency");
    }

    #[test]
    fn test_article_accepts_missing_fields() {
        let article: Article = serde_json::from_str(r#"{"title": "Only a title"}"#).unwrap();
        assert_eq!(article.title, "Only a title");
        assert!(article.paragraphs.is_empty());
    }

    #[test]
    fn test_verdict_highlight_copies_fields() {
        let verdict = Verdict {
            claim: "The infrastructure bill costs $215 billion".to_string(),
            is_true: false,
            is_uncertain: false,
            confidence: 88.0,
            explanation: String::new(),
            sources: vec!["Local SVM Model".to_string()],
            correction: Some(Correction::new("$215 billion", "$320 billion")),
            source_url: "https://www.bea.gov/data/special-topics/infrastructure".to_string(),
            evidence_text: "Bureau of Economic Analysis".to_string(),
        };

        let highlight = verdict.highlight();
        assert_eq!(highlight.text, verdict.claim);
        assert!(!highlight.is_factual);
        assert_eq!(highlight.correction, verdict.correction);
        assert_eq!(highlight.source_url, verdict.source_url);

        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["isTrue"], false);
        assert!(json.get("sourceURL").is_some());
        assert!(json.get("evidenceText").is_some());
    }
}
