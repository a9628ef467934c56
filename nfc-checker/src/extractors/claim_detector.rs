//! Pattern Claim Detector
//!
//! Lexical claim detection: paragraphs are split into sentences and each
//! sentence is scored on independent boolean signals. No NLP model is
//! involved; the `ClaimDetector` trait keeps the door open for one.
//!
//! # Signals
//! - **Numeric:** currency, percentage, number+unit or date present
//! - **Factual indicator:** copula + determiner, "has/had X", reporting verb +
//!   "that", "according to", "in fact", research verbs, rate-of-change,
//!   causal connectives, superlatives
//! - **Named entity:** capitalized multi-word span or an all-caps acronym
//! - **Statistic / comparison vocabulary**
//! - **Dated context:** a date plus a temporal connective
//!
//! A sentence is a claim when it carries a numeric signal, a factual indicator
//! backed by a named entity or enough length, statistic or comparison
//! vocabulary, or dated context.

use super::numeric_value::NumericValueExtractor;
use crate::types::{Claim, ClaimDetector};
use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use std::collections::HashSet;
use tracing::debug;

/// Maximum claims returned per analysis
pub const MAX_CLAIMS: usize = 15;

/// Sentences must be longer than this many characters (trimmed)
const MIN_SENTENCE_CHARS: usize = 10;

/// Sentences longer than this may stand as factual without a named entity
const LONG_SENTENCE_CHARS: usize = 40;

static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?;]+").expect("sentence boundary pattern is valid"));

static FACT_INDICATORS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?i)\b(is|was|are|were)\s+(the|a|an)\s+.{3,30}\b",
        r"(?i)\b(has|had|have|having)\s+.{3,30}\b",
        r"(?i)\b(confirmed|announced|reported|stated|said|claimed|found|discovered|revealed)\s+that\b",
        r"(?i)\baccording to\b.{5,40}",
        r"(?i)\bin fact\b",
        r"(?i)\b(studies|research|data|evidence|experts|scientists)\s+(show|suggest|indicate|reveal|confirm)\b",
        r"(?i)\b(increased|decreased|reduced|improved|worsened|changed)\s+by\b",
        r"(?i)\bcaused\s+by\b",
        r"(?i)\b(leads|led)\s+to\b",
        r"(?i)\b(results|resulted)\s+in\b",
        r"(?i)\bis\s+known\s+for\b",
        r"(?i)\b(first|largest|smallest|highest|lowest|best|worst|most|least)\b",
    ])
    .expect("factual indicator patterns are valid")
});

// Case-sensitive: capitalization is the signal
static NAMED_ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,5}\b|\b[A-Z]{2,}\b")
        .expect("named entity pattern is valid")
});

static STATISTIC_VOCABULARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(statistics|stat|study|poll|survey|rate|average|mean|median|percentage)\b")
        .expect("statistic pattern is valid")
});

static COMPARISON_VOCABULARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(more than|less than|greater|higher|lower|better|worse|increased|decreased|compared to|comparison)\b",
    )
    .expect("comparison pattern is valid")
});

static TEMPORAL_CONNECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(since|until|before|after|during|when)\b")
        .expect("temporal connective pattern is valid")
});

/// Signals evaluated on one sentence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClaimSignals {
    pub has_currency: bool,
    pub has_percentage: bool,
    pub has_number_with_unit: bool,
    pub has_date: bool,
    pub has_factual_indicator: bool,
    pub has_named_entity: bool,
    pub is_factual_claim: bool,
    pub contains_statistic: bool,
    pub contains_comparison: bool,
    pub contains_dated_context: bool,
}

impl ClaimSignals {
    pub fn is_numerical_claim(&self) -> bool {
        self.has_currency || self.has_percentage || self.has_number_with_unit || self.has_date
    }

    /// Whether the sentence is worth sending to the verifier
    pub fn is_claim(&self) -> bool {
        self.is_numerical_claim()
            || self.is_factual_claim
            || self.contains_statistic
            || self.contains_comparison
            || self.contains_dated_context
    }
}

/// Lexical claim detector
#[derive(Debug, Clone)]
pub struct PatternClaimDetector {
    values: NumericValueExtractor,
}

impl PatternClaimDetector {
    /// Create detector with the default claim cap (15)
    pub fn new() -> Self {
        Self {
            values: NumericValueExtractor::new(),
        }
    }

    /// Evaluate every signal on one trimmed sentence
    pub fn evaluate(&self, sentence: &str) -> ClaimSignals {
        let numeric = self.values.signals(sentence);
        let has_factual_indicator = FACT_INDICATORS.is_match(sentence);
        let has_named_entity = NAMED_ENTITY.is_match(sentence);
        let is_long = sentence.chars().count() > LONG_SENTENCE_CHARS;

        ClaimSignals {
            has_currency: numeric.currency,
            has_percentage: numeric.percentage,
            has_number_with_unit: numeric.number_with_unit,
            has_date: numeric.date,
            has_factual_indicator,
            has_named_entity,
            is_factual_claim: has_factual_indicator && (has_named_entity || is_long),
            contains_statistic: STATISTIC_VOCABULARY.is_match(sentence),
            contains_comparison: COMPARISON_VOCABULARY.is_match(sentence),
            contains_dated_context: numeric.date && TEMPORAL_CONNECTIVE.is_match(sentence),
        }
    }
}

impl Default for PatternClaimDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Sentence fragments of a paragraph, trimmed, longer than 10 characters
pub fn split_sentences(paragraph: &str) -> impl Iterator<Item = &str> {
    SENTENCE_BOUNDARY
        .split(paragraph)
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
}

impl ClaimDetector for PatternClaimDetector {
    fn name(&self) -> &'static str {
        "PatternClaimDetector"
    }

    fn detect(&self, paragraphs: &[String]) -> Vec<Claim> {
        let mut claims = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        'paragraphs: for paragraph in paragraphs {
            for sentence in split_sentences(paragraph) {
                if seen.contains(sentence) {
                    continue;
                }

                let signals = self.evaluate(sentence);
                if !signals.is_claim() {
                    continue;
                }

                seen.insert(sentence);
                claims.push(sentence.to_string());

                if claims.len() >= MAX_CLAIMS {
                    break 'paragraphs;
                }
            }
        }

        debug!(
            paragraphs = paragraphs.len(),
            claims = claims.len(),
            "Claim detection complete"
        );

        claims
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraphs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_discards_short_fragments() {
        let sentences: Vec<_> =
            split_sentences("Yes. No!! The committee met on Tuesday; Really? It was long.").collect();
        assert_eq!(sentences, vec!["The committee met on Tuesday", "It was long"]);
    }

    #[test]
    fn test_numeric_sentence_is_claim() {
        let detector = PatternClaimDetector::new();
        let claims = detector.detect(&paragraphs(&["The infrastructure bill costs $215 billion."]));
        assert_eq!(claims, vec!["The infrastructure bill costs $215 billion"]);
    }

    #[test]
    fn test_percentage_sentence_is_claim() {
        let detector = PatternClaimDetector::new();
        let claims = detector.detect(&paragraphs(&["Unemployment fell to 3%."]));
        assert_eq!(claims, vec!["Unemployment fell to 3%"]);
    }

    #[test]
    fn test_factual_indicator_needs_entity_or_length() {
        let detector = PatternClaimDetector::new();

        // Indicator + named entity
        let signals = detector.evaluate("Paris is the capital of the French Republic");
        assert!(signals.has_factual_indicator);
        assert!(signals.has_named_entity);
        assert!(signals.is_factual_claim);

        // Indicator, no entity, short sentence
        let signals = detector.evaluate("it was a good day out");
        assert!(signals.has_factual_indicator);
        assert!(!signals.has_named_entity);
        assert!(!signals.is_factual_claim);
        assert!(!signals.is_claim());

        // Indicator, no entity, long sentence
        let signals = detector.evaluate("the committee said that the plan would go ahead next week");
        assert!(signals.is_factual_claim);
    }

    #[test]
    fn test_acronym_counts_as_entity() {
        let detector = PatternClaimDetector::new();
        assert!(detector.evaluate("the NASA budget").has_named_entity);
        assert!(!detector.evaluate("a quiet afternoon").has_named_entity);
    }

    #[test]
    fn test_statistic_and_comparison_vocabulary() {
        let detector = PatternClaimDetector::new();
        assert!(detector.evaluate("a new survey of local residents").contains_statistic);
        assert!(detector.evaluate("electric cars are better for cities").contains_comparison);
    }

    #[test]
    fn test_dated_context() {
        let detector = PatternClaimDetector::new();
        let signals = detector.evaluate("prices have climbed since March 3");
        assert!(signals.has_date);
        assert!(signals.contains_dated_context);
        assert!(signals.is_claim());
    }

    #[test]
    fn test_opinion_is_not_claim() {
        let detector = PatternClaimDetector::new();
        let claims = detector.detect(&paragraphs(&["I really enjoyed the concert tonight."]));
        assert!(claims.is_empty());
    }

    #[test]
    fn test_duplicates_are_removed() {
        // Repeats within a paragraph, across paragraphs, and with padding
        let detector = PatternClaimDetector::new();
        let claims = detector.detect(&paragraphs(&[
            "The city hired 500 people this year. The city hired 500 people this year.",
            "  The city hired 500 people this year  !",
        ]));
        assert_eq!(claims, vec!["The city hired 500 people this year"]);
    }

    #[test]
    fn test_claim_cap() {
        let detector = PatternClaimDetector::new();
        let text: String = (0..40)
            .map(|i| format!("The city hired {} people this year. ", i + 100))
            .collect();
        let claims = detector.detect(&paragraphs(&[&text]));
        assert_eq!(claims.len(), MAX_CLAIMS);
        assert_eq!(claims[0], "The city hired 100 people this year");
        assert_eq!(claims[14], "The city hired 114 people this year");
    }

    #[test]
    fn test_empty_input() {
        let detector = PatternClaimDetector::new();
        assert!(detector.detect(&[]).is_empty());
        assert!(detector.detect(&paragraphs(&["", "   "])).is_empty());
    }
}
