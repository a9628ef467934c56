//! Utility modules for nfc-checker

pub mod number_format;

pub use number_format::{format_grouped, format_plain, parse_number};
