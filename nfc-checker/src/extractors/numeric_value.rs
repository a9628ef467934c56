//! Numeric Value Extractor
//!
//! Finds and categorizes numeric substrings in a claim.
//!
//! # Categories
//! 1. **currency** - `$` + number + optional scale word (`$215 billion`)
//! 2. **percentage** - number immediately followed by `%` (`3.5%`)
//! 3. **number-with-unit** - number + unit word (`37,000 people`)
//! 4. **date** - month + day, day + month (optional `, year`), or a bare year
//! 5. **standalone-number** - number + optional scale word, not followed by
//!    a unit word or `%`
//!
//! Values are returned grouped by category in the order above; within a
//! category they appear in text order. A standalone number that starts at the
//! same offset as another category's match is dropped.

use crate::types::{ExtractedValue, ValueKind};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Number token: comma-grouped thousands or plain digits, optional decimals
const NUMBER: &str = r"(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?";

const SCALE_WORDS: &str = r"million|billion|trillion|thousand";

/// Unit vocabulary, also used for the standalone-number exclusion
pub(crate) const UNIT_WORDS: [&str; 14] = [
    "people",
    "individuals",
    "users",
    "customers",
    "years",
    "months",
    "days",
    "kilometers",
    "miles",
    "meters",
    "feet",
    "kg",
    "tons",
    "pounds",
];

const MONTHS: &str =
    r"January|February|March|April|May|June|July|August|September|October|November|December";

pub(crate) static CURRENCY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\$(?P<number>{NUMBER})(?:\s*(?P<scale>{SCALE_WORDS})\b)?"
    ))
    .expect("currency pattern is valid")
});

pub(crate) static PERCENTAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?P<number>{NUMBER})%")).expect("percentage pattern is valid")
});

pub(crate) static NUMBER_WITH_UNIT_RE: Lazy<Regex> = Lazy::new(|| {
    let units = UNIT_WORDS.join("|");
    Regex::new(&format!(
        r"(?i)\b(?P<number>{NUMBER})\s*(?P<unit>{units})\b"
    ))
    .expect("number-with-unit pattern is valid")
});

pub(crate) static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:(?:{MONTHS})\s+\d{{1,2}}(?:,\s+\d{{4}})?\b|\d{{1,2}}\s+(?:{MONTHS})(?:,\s+\d{{4}})?\b|\d{{4}}\b)"
    ))
    .expect("date pattern is valid")
});

pub(crate) static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?P<year>\d{4})\b").expect("year pattern is valid"));

pub(crate) static STANDALONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?P<number>{NUMBER})(?:\s*(?P<scale>{SCALE_WORDS}))?\b"
    ))
    .expect("standalone-number pattern is valid")
});

/// Existence-only view of the four claim-relevant categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumericSignals {
    pub currency: bool,
    pub percentage: bool,
    pub number_with_unit: bool,
    pub date: bool,
}

impl NumericSignals {
    pub fn any(&self) -> bool {
        self.currency || self.percentage || self.number_with_unit || self.date
    }
}

/// Numeric value extractor
///
/// Stateless; all patterns are compiled once per process.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericValueExtractor;

impl NumericValueExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract every numeric value, grouped by category
    pub fn extract_all(&self, text: &str) -> Vec<ExtractedValue> {
        let mut values = Vec::new();

        for (kind, pattern) in [
            (ValueKind::Currency, &*CURRENCY_RE),
            (ValueKind::Percentage, &*PERCENTAGE_RE),
            (ValueKind::NumberWithUnit, &*NUMBER_WITH_UNIT_RE),
            (ValueKind::Date, &*DATE_RE),
        ] {
            values.extend(pattern.find_iter(text).map(|m| ExtractedValue {
                kind,
                raw_text: m.as_str().to_string(),
                position: m.start(),
                length: m.len(),
            }));
        }

        for (position, raw_text) in standalone_numbers(text) {
            if values.iter().any(|v| v.position == position) {
                continue;
            }
            values.push(ExtractedValue {
                kind: ValueKind::StandaloneNumber,
                length: raw_text.len(),
                raw_text: raw_text.to_string(),
                position,
            });
        }

        values
    }

    /// First value in category order, the one a correction is built from
    pub fn first(&self, text: &str) -> Option<ExtractedValue> {
        self.extract_all(text).into_iter().next()
    }

    /// Whether any category (standalone numbers included) matches
    pub fn contains_numerical_value(&self, text: &str) -> bool {
        self.signals(text).any() || standalone_numbers(text).next().is_some()
    }

    /// Existence checks used by claim detection
    pub fn signals(&self, text: &str) -> NumericSignals {
        NumericSignals {
            currency: CURRENCY_RE.is_match(text),
            percentage: PERCENTAGE_RE.is_match(text),
            number_with_unit: NUMBER_WITH_UNIT_RE.is_match(text),
            date: DATE_RE.is_match(text),
        }
    }
}

/// Standalone numbers with their byte offsets
///
/// A candidate followed (after optional whitespace) by a unit word or `%` is
/// rejected. When the rejected candidate carried a scale word, the bare
/// number is tried on its own.
fn standalone_numbers(text: &str) -> impl Iterator<Item = (usize, &str)> {
    STANDALONE_RE.captures_iter(text).filter_map(move |caps| {
        let whole = caps.get(0)?;
        if !is_followed_by_unit(&text[whole.end()..]) {
            return Some((whole.start(), whole.as_str()));
        }

        let number = caps.name("number")?;
        if caps.name("scale").is_some() && !is_followed_by_unit(&text[number.end()..]) {
            return Some((number.start(), number.as_str()));
        }
        None
    })
}

fn is_followed_by_unit(rest: &str) -> bool {
    let rest = rest.trim_start();
    if rest.starts_with('%') {
        return true;
    }
    UNIT_WORDS.iter().any(|unit| {
        rest.get(..unit.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(unit))
    })
}

/// Named capture as text, empty when absent
pub(crate) fn capture<'t>(caps: &Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map_or("", |m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(values: &[ExtractedValue]) -> Vec<(ValueKind, &str)> {
        values.iter().map(|v| (v.kind, v.raw_text.as_str())).collect()
    }

    #[test]
    fn test_currency_with_scale() {
        let values = NumericValueExtractor.extract_all("The infrastructure bill costs $215 billion");
        assert_eq!(values[0].kind, ValueKind::Currency);
        assert_eq!(values[0].raw_text, "$215 billion");
        assert_eq!(values[0].position, 30);
        assert_eq!(values[0].length, "$215 billion".len());
    }

    #[test]
    fn test_currency_grouped_and_plain() {
        let values = NumericValueExtractor.extract_all("Homes sold for $427,890 and rent was $1500 in town");
        let currency: Vec<_> = values
            .iter()
            .filter(|v| v.kind == ValueKind::Currency)
            .map(|v| v.raw_text.as_str())
            .collect();
        assert_eq!(currency, vec!["$427,890", "$1500"]);
    }

    #[test]
    fn test_currency_does_not_capture_trailing_space() {
        let values = NumericValueExtractor.extract_all("It cost $500 in total");
        assert_eq!(values[0].raw_text, "$500");
    }

    #[test]
    fn test_percentage_at_sentence_end() {
        let values = NumericValueExtractor.extract_all("Unemployment fell to 3%");
        assert_eq!(kinds(&values), vec![(ValueKind::Percentage, "3%")]);
    }

    #[test]
    fn test_decimal_percentage_not_duplicated_as_standalone() {
        let values = NumericValueExtractor.extract_all("The economy grew by 3.5% last year");
        assert_eq!(kinds(&values), vec![(ValueKind::Percentage, "3.5%")]);
    }

    #[test]
    fn test_number_with_unit() {
        let values = NumericValueExtractor.extract_all("The plant employs 37,000 people");
        assert_eq!(kinds(&values), vec![(ValueKind::NumberWithUnit, "37,000 people")]);
    }

    #[test]
    fn test_unit_words_are_case_insensitive() {
        let values = NumericValueExtractor.extract_all("A bridge of 300 Meters");
        assert_eq!(kinds(&values), vec![(ValueKind::NumberWithUnit, "300 Meters")]);
    }

    #[test]
    fn test_date_forms() {
        let extractor = NumericValueExtractor;

        let values = extractor.extract_all("The project was completed on January 15, 2023");
        assert_eq!(values[0].kind, ValueKind::Date);
        assert_eq!(values[0].raw_text, "January 15, 2023");

        let values = extractor.extract_all("Signed on 4 July, 1776 by delegates");
        assert_eq!(values[0].raw_text, "4 July, 1776");

        let values = extractor.extract_all("Founded in 1998 by two students");
        assert_eq!(kinds(&values), vec![(ValueKind::Date, "1998")]);
    }

    #[test]
    fn test_bare_year_deduplicates_standalone() {
        let values = NumericValueExtractor.extract_all("Revenue peaked in 2022");
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].kind, ValueKind::Date);
    }

    #[test]
    fn test_standalone_number_with_scale() {
        let values = NumericValueExtractor.extract_all("Roughly 4.2 million tickets were sold");
        assert_eq!(kinds(&values), vec![(ValueKind::StandaloneNumber, "4.2 million")]);
    }

    #[test]
    fn test_standalone_rejected_before_unit_or_percent() {
        let extractor = NumericValueExtractor;
        assert!(standalone_numbers("about 25 people came").next().is_none());
        assert!(standalone_numbers("about 25 % of them").next().is_none());

        let values = extractor.extract_all("SpaceX launched 58 satellites");
        assert_eq!(kinds(&values), vec![(ValueKind::StandaloneNumber, "58")]);
    }

    #[test]
    fn test_scaled_number_before_unit_falls_back_to_bare_number() {
        let found: Vec<_> = standalone_numbers("nearly 5 million people voted").collect();
        assert_eq!(found, vec![(7, "5")]);
    }

    #[test]
    fn test_category_order_not_text_order() {
        let values = NumericValueExtractor.extract_all("In 2021, 40% of the $3 billion went to 500 users");
        let ordered: Vec<_> = values.iter().map(|v| v.kind).collect();
        assert_eq!(
            ordered,
            vec![
                ValueKind::Currency,
                ValueKind::Percentage,
                ValueKind::NumberWithUnit,
                ValueKind::Date,
                // "3 billion" starts after the `$`, so it is not a duplicate
                ValueKind::StandaloneNumber,
            ]
        );
        assert_eq!(NumericValueExtractor.first("In 2021, 40% of the $3 billion").unwrap().kind, ValueKind::Currency);
    }

    #[test]
    fn test_contains_numerical_value() {
        let extractor = NumericValueExtractor;
        assert!(extractor.contains_numerical_value("SpaceX launched 58 satellites"));
        assert!(extractor.contains_numerical_value("Unemployment fell to 3%"));
        assert!(!extractor.contains_numerical_value("Paris is the capital of France"));
    }

    #[test]
    fn test_signals_exclude_standalone() {
        let signals = NumericValueExtractor.signals("SpaceX launched 58 satellites");
        assert!(!signals.any());

        let signals = NumericValueExtractor.signals("It cost $5 and took 3 days");
        assert!(signals.currency);
        assert!(signals.number_with_unit);
        assert!(!signals.percentage);
    }

    #[test]
    fn test_no_values_in_plain_text() {
        assert!(NumericValueExtractor.extract_all("No numbers here at all").is_empty());
    }
}
