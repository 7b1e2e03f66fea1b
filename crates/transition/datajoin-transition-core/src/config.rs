//! Scheduler configuration.

use serde::{Deserialize, Serialize};

use crate::ease::Ease;

/// Defaults applied by `Scheduler::spec` and limits enforced per tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub default_duration_ms: f32,
    pub default_delay_ms: f32,
    pub default_ease: Ease,
    /// Maximum events retained per tick; the rest are counted as dropped.
    pub max_events_per_tick: usize,
    /// How many finished transitions keep an answer for `Scheduler::state`.
    pub retained_states: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: 250.0,
            default_delay_ms: 0.0,
            default_ease: Ease::Linear,
            max_events_per_tick: 1024,
            retained_states: 4096,
        }
    }
}
