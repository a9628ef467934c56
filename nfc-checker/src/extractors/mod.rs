//! Text Extractors
//!
//! Lexical analysis of article text. Both extractors are pure and synchronous;
//! they hold no per-run state and may be shared freely across tasks.
//!
//! # Extractors
//! 1. **claim_detector** - Split paragraphs into sentences and keep checkable claims
//! 2. **numeric_value** - Locate and categorize numeric substrings in a claim

pub mod claim_detector;
pub mod numeric_value;

pub use claim_detector::{ClaimSignals, PatternClaimDetector, MAX_CLAIMS};
pub use numeric_value::{NumericSignals, NumericValueExtractor};
