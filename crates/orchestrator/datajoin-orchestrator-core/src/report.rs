use serde::{Deserialize, Serialize};

use datajoin_api_core::ElementHandle;
use datajoin_join_core::Key;
use datajoin_transition_core::TransitionEvent;

use crate::diagnostics::Diagnostic;
use crate::plan::JoinMode;

/// Summary of one `apply`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplyReport {
    /// Count of successful applies on this orchestrator, this one included.
    pub epoch: u64,
    pub mode: Option<JoinMode>,
    pub updated: Vec<Key>,
    pub entered: Vec<Key>,
    pub exited: Vec<Key>,
    /// Exiting elements removed right away (no exit transition).
    pub removed: Vec<ElementHandle>,
    /// Direct renderer writes (attribute, style and text).
    pub writes: usize,
    /// Transitions handed to the scheduler.
    pub scheduled: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl ApplyReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == crate::diagnostics::Severity::Error)
    }
}

/// Summary of one `tick`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickReport {
    pub now_ms: f32,
    pub writes: usize,
    /// Exiting elements whose transitions all ended this tick.
    pub removed: Vec<ElementHandle>,
    pub events: Vec<TransitionEvent>,
}
