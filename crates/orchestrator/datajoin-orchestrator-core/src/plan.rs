//! What an apply renders: element tag, attribute rules and per-phase timing.

use serde::{Deserialize, Serialize};
use std::fmt;

use datajoin_api_core::Value;
use datajoin_transition_core::{Ease, Target, TransitionSpec};

use crate::rules::{AttributeRules, ExitRules};

/// How records are matched to existing elements. Fixed by the first apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinMode {
    Keyed,
    Positional,
}

impl fmt::Display for JoinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JoinMode::Keyed => "keyed",
            JoinMode::Positional => "positional",
        })
    }
}

/// Timing for one phase. `stagger_ms` adds `index * stagger_ms` to the delay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionCfg {
    pub duration_ms: f32,
    pub delay_ms: f32,
    pub stagger_ms: f32,
    pub ease: Ease,
}

impl Default for TransitionCfg {
    fn default() -> Self {
        Self {
            duration_ms: 250.0,
            delay_ms: 0.0,
            stagger_ms: 0.0,
            ease: Ease::Linear,
        }
    }
}

impl TransitionCfg {
    pub fn new(duration_ms: f32) -> Self {
        Self {
            duration_ms,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, ms: f32) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn with_stagger(mut self, ms: f32) -> Self {
        self.stagger_ms = ms;
        self
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn delay_for(&self, index: usize) -> f32 {
        self.delay_ms + self.stagger_ms * index as f32
    }

    pub(crate) fn spec(&self, target: Target, start: Value, end: Value, index: usize) -> TransitionSpec {
        TransitionSpec::new(target, start, end)
            .with_duration(self.duration_ms)
            .with_delay(self.delay_for(index))
            .with_ease(self.ease)
    }
}

/// Rendering plan for one `apply` call over records of type `R`.
pub struct Plan<R> {
    /// Tag passed to `Renderer::create` for entering records.
    pub tag: String,
    /// Target values for updating and entering elements.
    pub rules: AttributeRules<R>,
    /// Values written right after creation, before `rules`. Entering elements
    /// animate from these when `enter_transition` is set.
    pub enter: AttributeRules<R>,
    /// Values exiting elements animate towards before removal.
    pub exit: ExitRules,
    pub update_transition: Option<TransitionCfg>,
    pub enter_transition: Option<TransitionCfg>,
    pub exit_transition: Option<TransitionCfg>,
}

impl<R> fmt::Debug for Plan<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plan")
            .field("tag", &self.tag)
            .field("rules", &self.rules)
            .field("enter", &self.enter)
            .field("exit", &self.exit)
            .field("update_transition", &self.update_transition)
            .field("enter_transition", &self.enter_transition)
            .field("exit_transition", &self.exit_transition)
            .finish()
    }
}

impl<R> Plan<R> {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            rules: AttributeRules::new(),
            enter: AttributeRules::new(),
            exit: ExitRules::new(),
            update_transition: None,
            enter_transition: None,
            exit_transition: None,
        }
    }

    pub fn with_rules(mut self, rules: AttributeRules<R>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_enter(mut self, rules: AttributeRules<R>) -> Self {
        self.enter = rules;
        self
    }

    pub fn with_exit(mut self, rules: ExitRules) -> Self {
        self.exit = rules;
        self
    }

    pub fn with_update_transition(mut self, cfg: TransitionCfg) -> Self {
        self.update_transition = Some(cfg);
        self
    }

    pub fn with_enter_transition(mut self, cfg: TransitionCfg) -> Self {
        self.enter_transition = Some(cfg);
        self
    }

    pub fn with_exit_transition(mut self, cfg: TransitionCfg) -> Self {
        self.exit_transition = Some(cfg);
        self
    }

    /// Same timing for all three phases.
    pub fn with_transition(self, cfg: TransitionCfg) -> Self {
        self.with_update_transition(cfg)
            .with_enter_transition(cfg)
            .with_exit_transition(cfg)
    }
}
