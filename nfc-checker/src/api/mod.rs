//! HTTP API handlers for nfc-checker
//!
//! REST endpoints for starting and polling analyses, plus SSE for lifecycle
//! and highlight events.

pub mod analysis;
pub mod health;
pub mod settings;
pub mod sse;

pub use analysis::analysis_routes;
pub use health::health_routes;
pub use settings::settings_routes;
pub use sse::event_stream;
