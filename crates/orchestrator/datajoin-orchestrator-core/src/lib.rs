//! datajoin-orchestrator
//!
//! Ties reconciliation, attribute rules and the transition scheduler to a
//! `Renderer`. Each `Orchestrator` owns one binding table and one scheduler;
//! independent visualizations use independent orchestrators.
//!
//! `apply` renders a snapshot synchronously. `tick` advances transitions and
//! retires exiting elements once their exit transitions end.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod phases;
pub mod plan;
pub mod report;
pub mod rules;

use hashbrown::HashMap;
use indexmap::IndexMap;

use datajoin_api_core::{ElementHandle, Renderer};
use datajoin_join_core::{reconcile, reconcile_positional, Binding, BindingTable, Join, Key};
use datajoin_transition_core::{Scheduler, Target};

pub use crate::config::OrchestratorConfig;
pub use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticsCfg, Severity};
pub use crate::error::OrchestratorError;
pub use crate::phases::PendingExit;
pub use crate::plan::{JoinMode, Plan, TransitionCfg};
pub use crate::report::{ApplyReport, TickReport};
pub use crate::rules::{AttributeRules, ExitRuleFn, ExitRules, RuleFn};

use crate::diagnostics::DiagnosticSink;
use crate::phases::Pass;

#[derive(Debug, Default)]
pub struct Orchestrator {
    cfg: OrchestratorConfig,
    table: BindingTable,
    scheduler: Scheduler,
    mode: Option<JoinMode>,
    /// Bound (not exiting) elements by handle.
    elements: HashMap<ElementHandle, Key>,
    exiting: IndexMap<ElementHandle, PendingExit>,
    epoch: u64,
}

impl Orchestrator {
    pub fn new(cfg: OrchestratorConfig) -> Self {
        Self {
            scheduler: Scheduler::new(cfg.scheduler.clone()),
            cfg,
            table: BindingTable::new(),
            mode: None,
            elements: HashMap::new(),
            exiting: IndexMap::new(),
            epoch: 0,
        }
    }

    /// Render `snapshot`, matching records to elements by `key_fn`.
    ///
    /// Fails before any renderer call when keys repeat or when this
    /// orchestrator was first used positionally.
    pub fn apply<R, F>(
        &mut self,
        renderer: &mut dyn Renderer,
        snapshot: &[R],
        key_fn: F,
        plan: &Plan<R>,
    ) -> Result<ApplyReport, OrchestratorError>
    where
        F: FnMut(&R) -> Key,
    {
        self.check_mode(JoinMode::Keyed)?;
        let join = reconcile(snapshot, key_fn, &self.table)?;
        let diagnostics = self.cfg.diagnostics.clone();
        let sink = DiagnosticSink::new(&diagnostics);
        Ok(self.commit(renderer, join, plan, JoinMode::Keyed, sink))
    }

    /// Render `snapshot`, matching records to elements by position.
    pub fn apply_positional<R>(
        &mut self,
        renderer: &mut dyn Renderer,
        snapshot: &[R],
        plan: &Plan<R>,
    ) -> Result<ApplyReport, OrchestratorError> {
        self.check_mode(JoinMode::Positional)?;
        let join = reconcile_positional(snapshot, &self.table);
        let diagnostics = self.cfg.diagnostics.clone();
        let mut sink = DiagnosticSink::new(&diagnostics);
        sink.push(Diagnostic::missing_key_function());
        Ok(self.commit(renderer, join, plan, JoinMode::Positional, sink))
    }

    fn check_mode(&self, requested: JoinMode) -> Result<(), OrchestratorError> {
        match self.mode {
            Some(established) if established != requested => {
                Err(OrchestratorError::MixedJoinMode {
                    established,
                    requested,
                })
            }
            _ => Ok(()),
        }
    }

    fn commit<R>(
        &mut self,
        renderer: &mut dyn Renderer,
        join: Join<'_, R>,
        plan: &Plan<R>,
        mode: JoinMode,
        sink: DiagnosticSink<'_>,
    ) -> ApplyReport {
        self.mode = Some(mode);
        self.epoch += 1;
        let Join {
            updates,
            enters,
            exits,
            table,
        } = join;

        let mut pass = Pass {
            scheduler: &mut self.scheduler,
            elements: &mut self.elements,
            exiting: &mut self.exiting,
            renderer,
            plan,
            table,
            sink,
            report: ApplyReport {
                epoch: self.epoch,
                mode: Some(mode),
                ..ApplyReport::default()
            },
        };
        pass.updates(&updates);
        pass.enters(&enters);
        pass.exits(exits);

        let Pass {
            mut table,
            sink,
            mut report,
            ..
        } = pass;
        table.sort_by_index();
        self.table = table;
        report.diagnostics = sink.finish();

        log::debug!(
            "apply #{} ({}): {} updated, {} entered, {} exited, {} writes, {} transitions, {} diagnostics",
            report.epoch,
            mode,
            report.updated.len(),
            report.entered.len(),
            report.exited.len(),
            report.writes,
            report.scheduled,
            report.diagnostics.len()
        );
        report
    }

    /// Advance transitions by `dt_ms`, write their values, and remove exiting
    /// elements whose exit transitions have all ended.
    pub fn tick(&mut self, renderer: &mut dyn Renderer, dt_ms: f32) -> TickReport {
        let mut report = TickReport::default();

        let out = self.scheduler.tick(dt_ms);
        for change in &out.changes {
            let Target { element, attr } = &change.target;
            renderer.apply_value(*element, attr, &change.value);
            report.writes += 1;
            let binding = match self.elements.get(element) {
                Some(key) => self.table.get_mut(key),
                None => self.exiting.get_mut(element).map(|p| &mut p.binding),
            };
            if let Some(binding) = binding {
                binding.record(attr.clone(), change.value.clone());
            }
        }
        report.events = out.events.clone();
        report.now_ms = self.scheduler.now_ms();

        let finished: Vec<ElementHandle> = self
            .exiting
            .iter()
            .filter(|(_, pending)| {
                pending.transitions.iter().all(|id| {
                    self.scheduler
                        .state(*id)
                        .map_or(true, |state| state.is_terminal())
                })
            })
            .map(|(element, _)| *element)
            .collect();
        for element in finished {
            self.exiting.shift_remove(&element);
            self.scheduler.cancel_element(element);
            renderer.remove(element);
            report.removed.push(element);
        }

        if report.writes > 0 || !report.removed.is_empty() {
            log::trace!(
                "tick @{}ms: {} writes, {} removed",
                report.now_ms,
                report.writes,
                report.removed.len()
            );
        }
        report
    }

    /// Remove every element this orchestrator created, cancel all transitions
    /// and forget the join mode. Returns the number of elements removed.
    pub fn reset(&mut self, renderer: &mut dyn Renderer) -> usize {
        let mut removed = 0;
        let bound = std::mem::take(&mut self.table);
        for binding in bound {
            self.scheduler.cancel_element(binding.element);
            renderer.remove(binding.element);
            removed += 1;
        }
        for (element, _) in self.exiting.drain(..) {
            self.scheduler.cancel_element(element);
            renderer.remove(element);
            removed += 1;
        }
        self.elements.clear();
        self.mode = None;
        removed
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.cfg
    }

    /// Bindings in current snapshot order.
    pub fn bindings(&self) -> &BindingTable {
        &self.table
    }

    pub fn binding(&self, key: &Key) -> Option<&Binding> {
        self.table.get(key)
    }

    /// Key bound to a live (not exiting) element.
    pub fn key_for(&self, element: ElementHandle) -> Option<&Key> {
        self.elements.get(&element)
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn join_mode(&self) -> Option<JoinMode> {
        self.mode
    }

    /// Elements still animating out.
    pub fn pending_exits(&self) -> impl Iterator<Item = &Binding> {
        self.exiting.values().map(|p| &p.binding)
    }

    /// No transitions running and no elements waiting for removal.
    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle() && self.exiting.is_empty()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}
