//! Analysis Orchestrator
//!
//! Runs one article through the pipeline:
//! 1. Read settings (once)
//! 2. Detect claims
//! 3. Verify every claim concurrently, joining all before continuing
//! 4. Attach a correction and citation to each false numeric claim
//! 5. Score accuracy and pick the summary sentence
//!
//! Verifier faults never fail a run; each becomes a fallback verdict. Only a
//! settings failure aborts the run.

use crate::config::SettingsProvider;
use crate::error::AnalysisError;
use crate::extractors::NumericValueExtractor;
use crate::synthesis::{CorrectionSynthesizer, EvidenceSelector};
use crate::types::{
    AnalysisReport, Article, Claim, ClaimDetector, ClaimVerifier, VerifierResponse, Verdict,
    VerifyError,
};
use crate::utils::format_plain;
use futures::future::join_all;
use nfc_common::config::AnalysisSettings;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Confidence recorded on fallback verdicts
pub const FALLBACK_CONFIDENCE: f64 = 50.0;

pub const SUMMARY_NO_CLAIMS: &str = "No factual claims were identified in this article.";
pub const SUMMARY_HIGHLY_FACTUAL: &str = "This article appears to be highly factual.";
pub const SUMMARY_MOSTLY_FACTUAL: &str =
    "This article contains mostly factual information with some inaccuracies.";
pub const SUMMARY_MIXED: &str = "This article contains a mix of factual and non-factual information.";
pub const SUMMARY_INACCURATE: &str = "This article contains significant factual inaccuracies.";

/// Pipeline driver for single-article analysis runs
///
/// Holds no per-run state; concurrent runs on one orchestrator are isolated.
pub struct AnalysisOrchestrator {
    detector: Arc<dyn ClaimDetector>,
    verifier: Arc<dyn ClaimVerifier>,
    settings: Arc<dyn SettingsProvider>,
    values: NumericValueExtractor,
    evidence: EvidenceSelector,
}

impl AnalysisOrchestrator {
    pub fn new(
        detector: Arc<dyn ClaimDetector>,
        verifier: Arc<dyn ClaimVerifier>,
        settings: Arc<dyn SettingsProvider>,
    ) -> Self {
        Self {
            detector,
            verifier,
            settings,
            values: NumericValueExtractor::new(),
            evidence: EvidenceSelector::new(),
        }
    }

    pub fn detector(&self) -> &dyn ClaimDetector {
        self.detector.as_ref()
    }

    /// Source label of the verifier backing this orchestrator
    pub fn verifier_name(&self) -> &'static str {
        self.verifier.name()
    }

    /// Analyze one article with a fresh, entropy-seeded synthesizer
    pub async fn run(&self, article: &Article) -> Result<AnalysisReport, AnalysisError> {
        self.run_with(article, CorrectionSynthesizer::new()).await
    }

    /// Analyze one article using `synthesizer` (and its memo) for this run only
    pub async fn run_with<R: Rng + Send>(
        &self,
        article: &Article,
        mut synthesizer: CorrectionSynthesizer<R>,
    ) -> Result<AnalysisReport, AnalysisError> {
        let settings = self
            .settings
            .load()
            .await
            .map_err(|e| AnalysisError::SettingsUnavailable(e.to_string()))?;
        synthesizer.reset();

        let claims = self.detector.detect(&article.paragraphs);
        info!(
            title = %article.title,
            detector = self.detector.name(),
            claim_count = claims.len(),
            "Claims detected"
        );

        // Results come back in claim order regardless of completion order
        let responses = join_all(claims.iter().map(|claim| self.verifier.verify(claim))).await;

        let mut facts: Vec<Verdict> = claims
            .into_iter()
            .zip(responses)
            .map(|(claim, response)| match response {
                Ok(response) => self.verdict(claim, response, &settings),
                Err(e) => {
                    warn!(claim = %claim, error = %e, "Verification failed, using fallback verdict");
                    fallback_verdict(claim, &e)
                }
            })
            .collect();

        for verdict in facts.iter_mut().filter(|v| !v.is_true) {
            if !self.values.contains_numerical_value(&verdict.claim) {
                continue;
            }
            let Some(value) = self.values.first(&verdict.claim) else {
                continue;
            };

            let correction = synthesizer.synthesize(&value, &verdict.claim);
            let evidence = self.evidence.select(&value, &verdict.claim);
            debug!(
                claim = %verdict.claim,
                kind = %value.kind,
                original = %correction.original_value,
                corrected = %correction.corrected_value,
                "Correction attached"
            );

            verdict.correction = Some(correction);
            verdict.source_url = evidence.url;
            verdict.evidence_text = evidence.evidence;
        }

        let overall_accuracy = overall_accuracy(&facts);
        let summary_sentence = summary_sentence(facts.len(), overall_accuracy).to_string();

        info!(
            title = %article.title,
            overall_accuracy,
            claim_count = facts.len(),
            corrections = synthesizer.memo().len(),
            "Analysis complete"
        );

        Ok(AnalysisReport {
            article_title: article.title.clone(),
            article_url: article.url.clone(),
            overall_accuracy,
            summary_sentence,
            facts,
        })
    }

    fn verdict(&self, claim: Claim, response: VerifierResponse, settings: &AnalysisSettings) -> Verdict {
        let explanation = if response.is_true {
            "This claim appears to be supported by reliable sources.".to_string()
        } else {
            format!(
                "This claim appears to be false based on our verification with {}% confidence.",
                format_plain(response.confidence)
            )
        };

        Verdict {
            claim,
            is_true: response.is_true,
            is_uncertain: settings.is_uncertain(response.confidence),
            confidence: response.confidence,
            explanation,
            sources: vec![self.verifier.name().to_string()],
            correction: None,
            source_url: String::new(),
            evidence_text: String::new(),
        }
    }
}

/// Placeholder verdict for a claim the verifier could not judge
pub fn fallback_verdict(claim: Claim, error: &VerifyError) -> Verdict {
    let (explanation, source) = match error {
        VerifyError::Network(_) => (
            "Unable to verify claim due to connection error.",
            "Connection Error",
        ),
        VerifyError::Api { .. } => ("Unable to verify claim due to server error.", "Local API"),
        VerifyError::Parse(_) => (
            "Unable to verify claim due to malformed verifier response.",
            "Local API",
        ),
    };

    Verdict {
        claim,
        is_true: true,
        is_uncertain: true,
        confidence: FALLBACK_CONFIDENCE,
        explanation: explanation.to_string(),
        sources: vec![source.to_string()],
        correction: None,
        source_url: String::new(),
        evidence_text: String::new(),
    }
}

/// Share of true verdicts as a rounded percentage; 100 with no verdicts
pub fn overall_accuracy(facts: &[Verdict]) -> u8 {
    if facts.is_empty() {
        return 100;
    }
    let true_count = facts.iter().filter(|v| v.is_true).count();
    (100.0 * true_count as f64 / facts.len() as f64).round() as u8
}

pub fn summary_sentence(claim_count: usize, overall_accuracy: u8) -> &'static str {
    match (claim_count, overall_accuracy) {
        (0, _) => SUMMARY_NO_CLAIMS,
        (_, 90..) => SUMMARY_HIGHLY_FACTUAL,
        (_, 70..) => SUMMARY_MOSTLY_FACTUAL,
        (_, 50..) => SUMMARY_MIXED,
        _ => SUMMARY_INACCURATE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdicts(truths: &[bool]) -> Vec<Verdict> {
        truths
            .iter()
            .map(|t| Verdict {
                is_true: *t,
                ..fallback_verdict("claim".to_string(), &VerifyError::Parse(String::new()))
            })
            .collect()
    }

    #[test]
    fn test_accuracy_rounding() {
        assert_eq!(overall_accuracy(&[]), 100);
        assert_eq!(overall_accuracy(&verdicts(&[true, false, false])), 33);
        assert_eq!(overall_accuracy(&verdicts(&[true, true, false])), 67);
        assert_eq!(overall_accuracy(&verdicts(&[false, false])), 0);
    }

    #[test]
    fn test_summary_tiers() {
        assert_eq!(summary_sentence(0, 100), SUMMARY_NO_CLAIMS);
        assert_eq!(summary_sentence(3, 100), SUMMARY_HIGHLY_FACTUAL);
        assert_eq!(summary_sentence(3, 90), SUMMARY_HIGHLY_FACTUAL);
        assert_eq!(summary_sentence(3, 89), SUMMARY_MOSTLY_FACTUAL);
        assert_eq!(summary_sentence(3, 70), SUMMARY_MOSTLY_FACTUAL);
        assert_eq!(summary_sentence(3, 67), SUMMARY_MIXED);
        assert_eq!(summary_sentence(3, 50), SUMMARY_MIXED);
        assert_eq!(summary_sentence(3, 33), SUMMARY_INACCURATE);
    }

    #[test]
    fn test_fallback_labels() {
        let network = fallback_verdict("c".to_string(), &VerifyError::Network("refused".to_string()));
        assert_eq!(network.sources, vec!["Connection Error"]);
        assert_eq!(network.confidence, FALLBACK_CONFIDENCE);
        assert!(network.is_true && network.is_uncertain);
        assert!(network.correction.is_none());

        let api = fallback_verdict(
            "c".to_string(),
            &VerifyError::Api {
                status: 500,
                body: String::new(),
            },
        );
        assert_eq!(api.sources, vec!["Local API"]);
        assert_eq!(api.explanation, "Unable to verify claim due to server error.");
    }
}
