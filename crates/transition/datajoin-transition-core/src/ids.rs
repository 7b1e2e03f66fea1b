//! Transition identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle returned by `Scheduler::schedule`. Never reused within one scheduler.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionId(pub u64);

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Monotonic allocator for TransitionId.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> TransitionId {
        let id = TransitionId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}
