//! Correction Synthesizer
//!
//! Produces a plausible alternate value for a numeric substring of a false
//! claim. Rules are per value kind and keyed on context vocabulary in the
//! claim text (matched case-insensitively):
//!
//! | Kind | Rule |
//! |------|------|
//! | currency | ×1.2 ("trillion"), ×1.3 rounded ("billion"), ×1.25 rounded otherwise |
//! | percentage | fixed overrides for unemployment, inflation and the stock market, else ±5 |
//! | number-with-unit | people >10,000 ×1.4 to the nearest thousand, years +2, else ×1.3 |
//! | date | year shifted by ±2, ±1 or a weighted pick of {+1, -1, 0} |
//! | standalone-number | random factor banded by magnitude |
//!
//! Date and standalone corrections draw from the synthesizer's RNG; the memo
//! keeps them stable within a run.

use super::correction_memo::CorrectionMemo;
use crate::extractors::numeric_value::{
    capture, CURRENCY_RE, NUMBER_WITH_UNIT_RE, PERCENTAGE_RE, STANDALONE_RE, YEAR_RE,
};
use crate::types::{Correction, ExtractedValue, ValueKind};
use crate::utils::{format_grouped, format_plain, parse_number};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Literal override: the infrastructure bill figure is always corrected to 320
const INFRASTRUCTURE_AMOUNT: &str = "$215 billion";
const INFRASTRUCTURE_CORRECTED: f64 = 320.0;

const FOUNDING_WORDS: [&str; 4] = ["founded", "established", "began", "started"];
const CONFLICT_WORDS: [&str; 4] = ["war", "battle", "revolution", "independence"];

/// Correction synthesizer for one analysis run
pub struct CorrectionSynthesizer<R = StdRng> {
    rng: R,
    memo: CorrectionMemo,
}

impl CorrectionSynthesizer<StdRng> {
    /// Create synthesizer with an entropy-seeded RNG and an empty memo
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for CorrectionSynthesizer<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> CorrectionSynthesizer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            memo: CorrectionMemo::new(),
        }
    }

    pub fn memo(&self) -> &CorrectionMemo {
        &self.memo
    }

    /// Clear the memo so the synthesizer can serve a new run
    pub fn reset(&mut self) {
        self.memo.reset();
    }

    /// Correction for `value` in the context of `claim`
    ///
    /// A memo hit returns the stored correction untouched. A value the kind's
    /// pattern cannot parse comes back unchanged.
    pub fn synthesize(&mut self, value: &ExtractedValue, claim: &str) -> Correction {
        if let Some(hit) = self.memo.get(value.kind, &value.raw_text) {
            return hit.clone();
        }

        let context = claim.to_lowercase();
        let raw = value.raw_text.as_str();

        let corrected = match value.kind {
            ValueKind::Currency => correct_currency(raw, &context),
            ValueKind::Percentage => correct_percentage(raw, &context),
            ValueKind::NumberWithUnit => correct_number_with_unit(raw),
            ValueKind::Date => self.correct_date(raw, &context),
            ValueKind::StandaloneNumber => self.correct_standalone(raw),
        };

        let correction = match corrected {
            Some(corrected) => Correction::new(raw, corrected),
            None => {
                debug!(kind = %value.kind, raw_text = raw, "Value not parseable, leaving unchanged");
                Correction::unchanged(raw)
            }
        };

        self.memo.insert(value.kind, raw, correction.clone());
        correction
    }

    fn correct_date(&mut self, raw: &str, context: &str) -> Option<String> {
        let year_match = YEAR_RE.find(raw)?;
        let year: i32 = year_match.as_str().parse().ok()?;

        let offset = if FOUNDING_WORDS.iter().any(|w| context.contains(w)) {
            if self.rng.gen_bool(0.5) {
                2
            } else {
                -2
            }
        } else if CONFLICT_WORDS.iter().any(|w| context.contains(w)) {
            if self.rng.gen_bool(0.5) {
                1
            } else {
                -1
            }
        } else if self.rng.gen::<f64>() > 0.7 {
            1
        } else if self.rng.gen::<f64>() > 0.4 {
            -1
        } else {
            0
        };

        let shifted = (year + offset).to_string();
        Some(format!(
            "{}{}{}",
            &raw[..year_match.start()],
            shifted,
            &raw[year_match.end()..]
        ))
    }

    fn correct_standalone(&mut self, raw: &str) -> Option<String> {
        let caps = STANDALONE_RE.captures(raw)?;
        let number = parse_number(capture(&caps, "number"))?;

        let factor = if number > 1_000_000.0 {
            self.rng.gen_range(0.9..1.3)
        } else if number > 1_000.0 {
            self.rng.gen_range(0.85..1.35)
        } else {
            self.rng.gen_range(0.8..1.4)
        };

        let corrected = format_grouped((number * factor).round());
        Some(with_scale(corrected, capture(&caps, "scale")))
    }
}

fn correct_currency(raw: &str, context: &str) -> Option<String> {
    let caps = CURRENCY_RE.captures(raw)?;
    let number = parse_number(capture(&caps, "number"))?;

    let rendered = if context.contains("trillion") {
        format!("{:.1}", number * 1.2)
    } else if context.contains("billion") {
        if context.contains("infrastructure") && context.contains(INFRASTRUCTURE_AMOUNT) {
            format_grouped(INFRASTRUCTURE_CORRECTED)
        } else {
            format_grouped((number * 1.3).round())
        }
    } else {
        format_grouped((number * 1.25).round())
    };

    Some(with_scale(format!("${}", rendered), capture(&caps, "scale")))
}

fn correct_percentage(raw: &str, context: &str) -> Option<String> {
    let caps = PERCENTAGE_RE.captures(raw)?;
    let number = parse_number(capture(&caps, "number"))?;

    let corrected = if context.contains("unemployment") && number < 5.0 {
        3.2
    } else if context.contains("inflation") {
        7.4
    } else if context.contains("s&p") || context.contains("stock market") {
        if raw == "18%" {
            7.0
        } else {
            (number * 0.6).round()
        }
    } else if number > 20.0 {
        (number - 5.0).round()
    } else {
        (number + 5.0).round()
    };

    Some(format!("{}%", format_plain(corrected)))
}

fn correct_number_with_unit(raw: &str) -> Option<String> {
    let caps = NUMBER_WITH_UNIT_RE.captures(raw)?;
    let number = parse_number(capture(&caps, "number"))?;
    let unit = capture(&caps, "unit");

    let corrected = if unit.eq_ignore_ascii_case("people") && number > 10_000.0 {
        (number * 1.4 / 1000.0).round() * 1000.0
    } else if unit.eq_ignore_ascii_case("years") {
        number + 2.0
    } else {
        (number * 1.3).round()
    };

    Some(format!("{} {}", format_grouped(corrected), unit))
}

fn with_scale(value: String, scale: &str) -> String {
    if scale.is_empty() {
        value
    } else {
        format!("{} {}", value, scale)
    }
}
