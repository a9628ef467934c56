//! Numeric parsing and rendering helpers
//!
//! Rendering follows the browser conventions the extension displays:
//! integral values print without a fractional part, fractional values print
//! in shortest round-trip form, and grouped output uses `,` thousands
//! separators.

/// Parse a number that may carry `,` thousands separators
///
/// Returns `None` for anything that is not a finite number after the
/// separators are stripped.
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Render a number without grouping: `7`, `3.2`, `4.5`
pub fn format_plain(value: f64) -> String {
    if is_integral(value) {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Render a number with thousands separators when it is integral
///
/// Fractional values fall back to [`format_plain`].
pub fn format_grouped(value: f64) -> String {
    if !is_integral(value) {
        return format_plain(value);
    }

    let integer = value as i64;
    let digits = integer.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if integer < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Integral and small enough to round-trip through i64
fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15
}
