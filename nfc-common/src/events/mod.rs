//! Event types for the NFC event system
//!
//! Provides shared event definitions and the EventBus used to fan analysis
//! lifecycle and highlight events out to SSE clients.

mod analysis_types;

pub use analysis_types::{Correction, FactHighlight};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// NFC event types
///
/// Events are broadcast via EventBus and serialized for SSE transmission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NfcEvent {
    /// Analysis run accepted and started
    AnalysisStarted {
        analysis_id: Uuid,
        article_title: String,
        article_url: String,
        timestamp: DateTime<Utc>,
    },

    /// Analysis run produced a report
    AnalysisCompleted {
        analysis_id: Uuid,
        /// Overall accuracy score (0-100)
        overall_accuracy: u8,
        claim_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// Analysis run aborted before a report could be produced
    AnalysisFailed {
        analysis_id: Uuid,
        message: String,
        timestamp: DateTime<Utc>,
    },

    /// One verdict ready to be highlighted in the page
    FactHighlighted {
        analysis_id: Uuid,
        highlight: FactHighlight,
        timestamp: DateTime<Utc>,
    },
}

impl NfcEvent {
    /// Event name used as the SSE `event:` field
    pub fn event_type(&self) -> &'static str {
        match self {
            NfcEvent::AnalysisStarted { .. } => "AnalysisStarted",
            NfcEvent::AnalysisCompleted { .. } => "AnalysisCompleted",
            NfcEvent::AnalysisFailed { .. } => "AnalysisFailed",
            NfcEvent::FactHighlighted { .. } => "FactHighlighted",
        }
    }

    /// Analysis run this event belongs to
    pub fn analysis_id(&self) -> Uuid {
        match self {
            NfcEvent::AnalysisStarted { analysis_id, .. }
            | NfcEvent::AnalysisCompleted { analysis_id, .. }
            | NfcEvent::AnalysisFailed { analysis_id, .. }
            | NfcEvent::FactHighlighted { analysis_id, .. } => *analysis_id,
        }
    }
}

/// Broadcast bus for NfcEvents
///
/// Cloning shares the underlying channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<NfcEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of events to buffer before dropping old events
    ///
    /// # Examples
    ///
    /// ```
    /// use nfc_common::events::EventBus;
    ///
    /// let event_bus = EventBus::new(100);
    /// assert_eq!(event_bus.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<NfcEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists.
    /// Returns `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(&self, event: NfcEvent) -> Result<usize, broadcast::error::SendError<NfcEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: NfcEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
