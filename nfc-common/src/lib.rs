//! # NFC Common Library
//!
//! Shared code for the news fact-checking services including:
//! - Error types
//! - Configuration loading (TOML bootstrap + analysis settings)
//! - Event types (NfcEvent enum) and the broadcast EventBus
//! - Wire types shared between the analyzer and its presentation layer

pub mod config;
pub mod error;
pub mod events;

pub use error::{Error, Result};
