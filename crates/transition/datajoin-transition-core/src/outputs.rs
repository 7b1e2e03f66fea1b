//! Per-tick outputs: value changes plus lifecycle events.

use serde::{Deserialize, Serialize};

use datajoin_api_core::Value;

use crate::ids::TransitionId;
use crate::transition::Target;

/// One value produced for a target this tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub transition: TransitionId,
    pub target: Target,
    pub value: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
#[non_exhaustive]
pub enum TransitionEvent {
    /// Delay elapsed; first interpolated value emitted.
    Started {
        transition: TransitionId,
        target: Target,
    },
    /// Reached its end value.
    Ended {
        transition: TransitionId,
        target: Target,
    },
    /// Superseded by a newer transition on the same target.
    Interrupted {
        transition: TransitionId,
        target: Target,
        by: TransitionId,
    },
    Cancelled {
        transition: TransitionId,
        target: Target,
    },
}

impl TransitionEvent {
    pub fn transition(&self) -> TransitionId {
        match self {
            TransitionEvent::Started { transition, .. }
            | TransitionEvent::Ended { transition, .. }
            | TransitionEvent::Interrupted { transition, .. }
            | TransitionEvent::Cancelled { transition, .. } => *transition,
        }
    }

    pub fn target(&self) -> &Target {
        match self {
            TransitionEvent::Started { target, .. }
            | TransitionEvent::Ended { target, .. }
            | TransitionEvent::Interrupted { target, .. }
            | TransitionEvent::Cancelled { target, .. } => target,
        }
    }
}

/// Outputs returned by `Scheduler::tick`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TickOutputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<TransitionEvent>,
    /// Events discarded because the per-tick limit was reached.
    #[serde(default)]
    pub dropped_events: usize,
}

impl TickOutputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
        self.dropped_events = 0;
    }

    #[inline]
    pub fn push_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    /// Append an event unless `limit` events are already held.
    #[inline]
    pub fn push_event(&mut self, event: TransitionEvent, limit: usize) {
        if self.events.len() < limit {
            self.events.push(event);
        } else {
            self.dropped_events += 1;
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }
}
