//! Analysis workflow
//!
//! - **orchestrator** - detect → verify (fan-out/join) → correct → score
//! - **registry** - per-run status surface (`not_started` / `processing` / `complete` / `error`)
//! - **highlight** - per-verdict highlight delivery
//! - **session** - run lifecycle tying the three together with the event bus

pub mod highlight;
pub mod orchestrator;
pub mod registry;
pub mod session;

pub use highlight::{EventBusHighlightSink, HighlightSink};
pub use orchestrator::{fallback_verdict, overall_accuracy, summary_sentence, AnalysisOrchestrator};
pub use registry::{AnalysisRegistry, AnalysisStatus};
pub use session::AnalysisSession;
