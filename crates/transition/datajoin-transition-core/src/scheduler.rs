//! Transition scheduler.
//!
//! The scheduler owns no clock. Hosts call `tick(dt_ms)` (directly or through
//! a `FrameTicker`) and apply the returned changes themselves. Transitions are
//! processed in scheduling order so output order is deterministic.

use hashbrown::HashMap;
use indexmap::IndexMap;
use std::fmt;

use datajoin_api_core::{ElementHandle, Value};

use crate::config::SchedulerConfig;
use crate::ids::{IdAllocator, TransitionId};
use crate::outputs::{Change, TickOutputs, TransitionEvent};
use crate::transition::{Completed, Target, TransitionSpec, TransitionState};

/// Continuation run when a transition completes. Returning a spec schedules
/// it immediately.
pub type CompletionHook = Box<dyn FnOnce(&Completed) -> Option<TransitionSpec>>;

#[derive(Debug)]
struct Live {
    spec: TransitionSpec,
    elapsed_ms: f32,
    state: TransitionState,
}

pub struct Scheduler {
    cfg: SchedulerConfig,
    ids: IdAllocator,
    now_ms: f32,
    live: IndexMap<TransitionId, Live>,
    by_target: HashMap<Target, TransitionId>,
    retired: IndexMap<TransitionId, TransitionState>,
    hooks: HashMap<TransitionId, CompletionHook>,
    /// Events raised between ticks (supersession, cancellation).
    pending: Vec<TransitionEvent>,
    outputs: TickOutputs,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("now_ms", &self.now_ms)
            .field("live", &self.live.len())
            .field("retired", &self.retired.len())
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl Scheduler {
    pub fn new(cfg: SchedulerConfig) -> Self {
        Self {
            cfg,
            ids: IdAllocator::new(),
            now_ms: 0.0,
            live: IndexMap::new(),
            by_target: HashMap::new(),
            retired: IndexMap::new(),
            hooks: HashMap::new(),
            pending: Vec::new(),
            outputs: TickOutputs::default(),
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.cfg
    }

    /// A spec carrying this scheduler's configured defaults.
    pub fn spec(&self, target: Target, start: Value, end: Value) -> TransitionSpec {
        TransitionSpec::new(target, start, end)
            .with_duration(self.cfg.default_duration_ms)
            .with_delay(self.cfg.default_delay_ms)
            .with_ease(self.cfg.default_ease)
    }

    /// Register a transition. A live transition on the same target is
    /// interrupted and its completion hook dropped.
    pub fn schedule(&mut self, spec: TransitionSpec) -> TransitionId {
        let id = self.ids.alloc();
        let spec = spec.sanitized();
        if let Some(prev) = self.by_target.insert(spec.target.clone(), id) {
            if self.live.shift_remove(&prev).is_some() {
                self.hooks.remove(&prev);
                self.retire(prev, TransitionState::Cancelled);
                log::debug!("{id} interrupts {prev} on {}", spec.target);
                self.pending.push(TransitionEvent::Interrupted {
                    transition: prev,
                    target: spec.target.clone(),
                    by: id,
                });
            }
        }
        self.live.insert(
            id,
            Live {
                spec,
                elapsed_ms: 0.0,
                state: TransitionState::Scheduled,
            },
        );
        id
    }

    /// Attach a completion hook. Returns false (and drops the hook) when the
    /// transition is unknown or already finished. A later call replaces an
    /// earlier hook.
    pub fn on_completed<F>(&mut self, id: TransitionId, hook: F) -> bool
    where
        F: FnOnce(&Completed) -> Option<TransitionSpec> + 'static,
    {
        if !self.live.contains_key(&id) {
            return false;
        }
        self.hooks.insert(id, Box::new(hook));
        true
    }

    /// Stop a transition where it stands. Idempotent: returns whether a live
    /// transition was cancelled.
    pub fn cancel(&mut self, id: TransitionId) -> bool {
        let Some(live) = self.live.shift_remove(&id) else {
            return false;
        };
        let target = live.spec.target;
        if self.by_target.get(&target) == Some(&id) {
            self.by_target.remove(&target);
        }
        self.hooks.remove(&id);
        self.retire(id, TransitionState::Cancelled);
        log::debug!("cancelled {id} on {target}");
        self.pending.push(TransitionEvent::Cancelled {
            transition: id,
            target,
        });
        true
    }

    /// Cancel every live transition writing to `element`. Returns how many.
    pub fn cancel_element(&mut self, element: ElementHandle) -> usize {
        let ids: Vec<TransitionId> = self
            .live
            .iter()
            .filter(|(_, l)| l.spec.target.element == element)
            .map(|(id, _)| *id)
            .collect();
        ids.into_iter().filter(|id| self.cancel(*id)).count()
    }

    /// Cancel the live transition on one target, if any.
    pub fn cancel_target(&mut self, target: &Target) -> bool {
        match self.by_target.get(target).copied() {
            Some(id) => self.cancel(id),
            None => false,
        }
    }

    /// Lifecycle state, or None for ids this scheduler never issued or has
    /// stopped remembering.
    pub fn state(&self, id: TransitionId) -> Option<TransitionState> {
        self.live
            .get(&id)
            .map(|l| l.state)
            .or_else(|| self.retired.get(&id).copied())
    }

    pub fn active_for(&self, target: &Target) -> Option<TransitionId> {
        self.by_target.get(target).copied()
    }

    /// Spec of a live transition.
    pub fn spec_of(&self, id: TransitionId) -> Option<&TransitionSpec> {
        self.live.get(&id).map(|l| &l.spec)
    }

    pub fn active_len(&self) -> usize {
        self.live.len()
    }

    pub fn is_idle(&self) -> bool {
        self.live.is_empty()
    }

    pub fn now_ms(&self) -> f32 {
        self.now_ms
    }

    /// Outputs of the most recent tick.
    pub fn outputs(&self) -> &TickOutputs {
        &self.outputs
    }

    /// Advance every live transition by `dt_ms` and collect their values.
    ///
    /// Completed transitions are retired before their hooks run, so a hook
    /// may schedule a follow-up on the same target; that follow-up emits its
    /// first value on the next tick.
    pub fn tick(&mut self, dt_ms: f32) -> &TickOutputs {
        let dt = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        let limit = self.cfg.max_events_per_tick;
        self.outputs.clear();
        self.now_ms += dt;

        for event in self.pending.drain(..) {
            self.outputs.push_event(event, limit);
        }

        let mut finished: Vec<Completed> = Vec::new();
        for (id, live) in self.live.iter_mut() {
            live.elapsed_ms += dt;
            let Some((value, done)) = live.spec.sample(live.elapsed_ms) else {
                continue;
            };
            if live.state == TransitionState::Scheduled {
                live.state = TransitionState::Running;
                self.outputs.push_event(
                    TransitionEvent::Started {
                        transition: *id,
                        target: live.spec.target.clone(),
                    },
                    limit,
                );
            }
            self.outputs.push_change(Change {
                transition: *id,
                target: live.spec.target.clone(),
                value: value.clone(),
            });
            if done {
                live.state = TransitionState::Completed;
                self.outputs.push_event(
                    TransitionEvent::Ended {
                        transition: *id,
                        target: live.spec.target.clone(),
                    },
                    limit,
                );
                finished.push(Completed {
                    transition: *id,
                    target: live.spec.target.clone(),
                    value,
                    at_ms: self.now_ms,
                });
            }
        }

        for done in &finished {
            self.live.shift_remove(&done.transition);
            if self.by_target.get(&done.target) == Some(&done.transition) {
                self.by_target.remove(&done.target);
            }
            self.retire(done.transition, TransitionState::Completed);
        }

        for done in &finished {
            if let Some(hook) = self.hooks.remove(&done.transition) {
                if let Some(next) = hook(done) {
                    let follow = self.schedule(next);
                    log::trace!("{} chained {} on {}", done.transition, follow, done.target);
                }
            }
        }

        if self.outputs.dropped_events > 0 {
            log::warn!(
                "transition scheduler dropped {} events (limit {} per tick)",
                self.outputs.dropped_events,
                limit
            );
        }
        &self.outputs
    }

    fn retire(&mut self, id: TransitionId, state: TransitionState) {
        self.retired.insert(id, state);
        let cap = self.cfg.retained_states;
        if self.retired.len() > cap.saturating_mul(2).max(1) {
            let excess = self.retired.len() - cap;
            self.retired.drain(..excess);
        }
    }
}
