//! Analysis wire types
//!
//! Supporting types shared between the analyzer and the presentation layer
//! that renders its results.

use serde::{Deserialize, Serialize};

/// Fabricated alternate value for a claim judged false
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correction {
    /// Value as it appears in the claim
    pub original_value: String,
    /// Suggested replacement value
    pub corrected_value: String,
}

impl Correction {
    pub fn new(original_value: impl Into<String>, corrected_value: impl Into<String>) -> Self {
        Self {
            original_value: original_value.into(),
            corrected_value: corrected_value.into(),
        }
    }

    /// Fallback correction that leaves the value untouched
    pub fn unchanged(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            original_value: value.clone(),
            corrected_value: value,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.original_value == self.corrected_value
    }
}

/// Instruction for the presentation layer to mark one claim in the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactHighlight {
    /// Claim text to locate in the page
    pub text: String,
    /// Verdict: true when the claim was judged factual
    pub is_factual: bool,
    /// Correction for false numeric claims
    pub correction: Option<Correction>,
    /// Citation URL (empty when none)
    #[serde(rename = "sourceURL")]
    pub source_url: String,
    /// Citation text (empty when none)
    pub evidence_text: String,
}
