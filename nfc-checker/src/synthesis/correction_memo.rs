//! Per-run correction memo

use crate::types::{Correction, ValueKind};
use std::collections::HashMap;

/// Correction cache for one analysis run
///
/// Guarantees that the same `(kind, rawText)` pair yields the same correction
/// for the lifetime of the memo, even for randomized kinds.
#[derive(Debug, Clone, Default)]
pub struct CorrectionMemo {
    entries: HashMap<String, Correction>,
}

impl CorrectionMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Memo key: `kind:rawText`
    pub fn key(kind: ValueKind, raw_text: &str) -> String {
        format!("{}:{}", kind, raw_text)
    }

    pub fn get(&self, kind: ValueKind, raw_text: &str) -> Option<&Correction> {
        self.entries.get(&Self::key(kind, raw_text))
    }

    pub fn insert(&mut self, kind: ValueKind, raw_text: &str, correction: Correction) {
        self.entries.insert(Self::key(kind, raw_text), correction);
    }

    /// Forget every stored correction
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
