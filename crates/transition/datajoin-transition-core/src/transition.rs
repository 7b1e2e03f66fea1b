//! Transition descriptions and lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use datajoin_api_core::{interpolate, AttrKey, ElementHandle, InterpolateFn, Value};

use crate::ease::Ease;
use crate::ids::TransitionId;

/// The (element, attribute) pair a transition writes to. At most one live
/// transition exists per target.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub element: ElementHandle,
    pub attr: AttrKey,
}

impl Target {
    pub fn new(element: ElementHandle, attr: AttrKey) -> Self {
        Self { element, attr }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.element, self.attr)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionState {
    /// Waiting out its delay.
    Scheduled,
    Running,
    Completed,
    Cancelled,
}

impl TransitionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TransitionState::Completed | TransitionState::Cancelled)
    }
}

/// Everything needed to drive one attribute from `start` to `end`.
#[derive(Clone, Debug)]
pub struct TransitionSpec {
    pub target: Target,
    pub start: Value,
    pub end: Value,
    pub delay_ms: f32,
    pub duration_ms: f32,
    pub ease: Ease,
    pub interpolate: InterpolateFn,
}

impl TransitionSpec {
    /// Linear 250 ms tween with no delay using the default value interpolator.
    pub fn new(target: Target, start: Value, end: Value) -> Self {
        Self {
            target,
            start,
            end,
            delay_ms: 0.0,
            duration_ms: 250.0,
            ease: Ease::Linear,
            interpolate,
        }
    }

    pub fn with_duration(mut self, ms: f32) -> Self {
        self.duration_ms = ms;
        self
    }

    pub fn with_delay(mut self, ms: f32) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn with_interpolator(mut self, f: InterpolateFn) -> Self {
        self.interpolate = f;
        self
    }

    /// Value at `elapsed_ms` since scheduling, or None while still delayed.
    /// Returns exactly `end` once the duration has elapsed.
    pub fn sample(&self, elapsed_ms: f32) -> Option<(Value, bool)> {
        let active = elapsed_ms - self.delay_ms;
        if active < 0.0 {
            return None;
        }
        if active >= self.duration_ms {
            return Some((self.end.clone(), true));
        }
        let t = self.ease.apply(active / self.duration_ms);
        Some(((self.interpolate)(&self.start, &self.end, t), false))
    }

    pub(crate) fn sanitized(mut self) -> Self {
        if !self.delay_ms.is_finite() || self.delay_ms < 0.0 {
            self.delay_ms = 0.0;
        }
        if !self.duration_ms.is_finite() || self.duration_ms < 0.0 {
            self.duration_ms = 0.0;
        }
        self
    }
}

/// Passed to completion hooks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Completed {
    pub transition: TransitionId,
    pub target: Target,
    /// The final value written (`TransitionSpec::end`).
    pub value: Value,
    /// Scheduler clock at the tick that completed the transition.
    pub at_ms: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> TransitionSpec {
        TransitionSpec::new(
            Target::new(ElementHandle(1), AttrKey::attr("x")),
            Value::Float(0.0),
            Value::Float(10.0),
        )
        .with_duration(100.0)
        .with_delay(50.0)
    }

    #[test]
    fn sample_respects_delay_and_end() {
        let s = spec();
        assert_eq!(s.sample(20.0), None);
        assert_eq!(s.sample(50.0), Some((Value::Float(0.0), false)));
        assert_eq!(s.sample(100.0), Some((Value::Float(5.0), false)));
        assert_eq!(s.sample(150.0), Some((Value::Float(10.0), true)));
    }

    #[test]
    fn sanitize_rejects_negative_and_nan() {
        let s = spec().with_duration(f32::NAN).with_delay(-5.0).sanitized();
        assert_eq!(s.duration_ms, 0.0);
        assert_eq!(s.delay_ms, 0.0);
        assert_eq!(s.sample(0.0), Some((Value::Float(10.0), true)));
    }

    #[test]
    fn target_display() {
        let t = Target::new(ElementHandle(3), AttrKey::style("fill"));
        assert_eq!(t.to_string(), "#3.style.fill");
    }
}
