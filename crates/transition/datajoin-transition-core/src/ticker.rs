//! Frame sources.
//!
//! A `FrameTicker` calls its listeners once per frame with the elapsed time
//! in milliseconds. Hosts wrap their own frame callback; `ManualTicker` is a
//! simulated clock for tests and offline rendering.

use serde::{Deserialize, Serialize};

pub type TickListener = Box<dyn FnMut(f32)>;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

pub trait FrameTicker {
    fn subscribe(&mut self, listener: TickListener) -> SubscriptionId;
    /// Returns false when the subscription was unknown.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

#[derive(Default)]
pub struct ManualTicker {
    next: u64,
    now_ms: f32,
    frames: u64,
    listeners: Vec<(SubscriptionId, TickListener)>,
}

impl std::fmt::Debug for ManualTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualTicker")
            .field("now_ms", &self.now_ms)
            .field("frames", &self.frames)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one frame of `dt_ms` to every listener in subscription order.
    pub fn advance(&mut self, dt_ms: f32) {
        self.now_ms += dt_ms;
        self.frames += 1;
        for (_, listener) in self.listeners.iter_mut() {
            listener(dt_ms);
        }
    }

    /// Advance `total_ms` in frames of at most `frame_ms`. Returns the number
    /// of frames delivered.
    pub fn run_for(&mut self, total_ms: f32, frame_ms: f32) -> usize {
        if frame_ms.is_nan() || frame_ms <= 0.0 || !total_ms.is_finite() {
            return 0;
        }
        let mut remaining = total_ms;
        let mut frames = 0;
        while remaining > 0.0 {
            let dt = frame_ms.min(remaining);
            self.advance(dt);
            remaining -= dt;
            frames += 1;
        }
        frames
    }

    pub fn now_ms(&self) -> f32 {
        self.now_ms
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl FrameTicker for ManualTicker {
    fn subscribe(&mut self, listener: TickListener) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }
}
