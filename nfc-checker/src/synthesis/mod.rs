//! Correction Synthesis
//!
//! Builds the replacement value and citation attached to a claim the verifier
//! judged false. Runs only for claims that carry a numeric value.
//!
//! # Components
//! - **correction_memo** - per-run cache keyed by `kind:rawText`
//! - **correction_synthesizer** - per-kind correction rules
//! - **evidence_selector** - keyword decision table for citations
//!
//! A `CorrectionSynthesizer` owns its memo. Create one per analysis run and
//! drop it afterwards; runs never share a memo.

pub mod correction_memo;
pub mod correction_synthesizer;
pub mod evidence_selector;

pub use correction_memo::CorrectionMemo;
pub use correction_synthesizer::CorrectionSynthesizer;
pub use evidence_selector::EvidenceSelector;
