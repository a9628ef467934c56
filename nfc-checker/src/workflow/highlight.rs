//! Highlight sink
//!
//! Delivers per-verdict highlight instructions to the presentation layer.

use chrono::Utc;
use nfc_common::events::{EventBus, FactHighlight, NfcEvent};
use tracing::debug;
use uuid::Uuid;

/// Receiver of highlight instructions
pub trait HighlightSink: Send + Sync {
    fn highlight(&self, analysis_id: Uuid, highlight: FactHighlight);
}

/// Publishes highlights as `FactHighlighted` events (forwarded over SSE)
#[derive(Debug, Clone)]
pub struct EventBusHighlightSink {
    event_bus: EventBus,
}

impl EventBusHighlightSink {
    pub fn new(event_bus: EventBus) -> Self {
        Self { event_bus }
    }
}

impl HighlightSink for EventBusHighlightSink {
    fn highlight(&self, analysis_id: Uuid, highlight: FactHighlight) {
        debug!(analysis_id = %analysis_id, is_factual = highlight.is_factual, "Emitting highlight");
        self.event_bus.emit_lossy(NfcEvent::FactHighlighted {
            analysis_id,
            highlight,
            timestamp: Utc::now(),
        });
    }
}
