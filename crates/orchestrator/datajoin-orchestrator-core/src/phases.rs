//! The three render phases of an apply, run in order:
//!   updates -> enters -> exits
//!
//! Each phase issues its renderer calls before the next phase starts, so a
//! renderer sees every update write before the first create.

use hashbrown::HashMap;
use indexmap::IndexMap;

use datajoin_api_core::{AttrKey, ElementHandle, Renderer, Value};
use datajoin_join_core::{Binding, BindingTable, Enter, Key, Update};
use datajoin_transition_core::{Scheduler, Target, TransitionId};

use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::plan::{Plan, TransitionCfg};
use crate::report::ApplyReport;

/// An element kept alive until its exit transitions end.
#[derive(Debug, Clone)]
pub struct PendingExit {
    pub binding: Binding,
    pub transitions: Vec<TransitionId>,
}

/// Mutable state threaded through the phases of one apply.
pub(crate) struct Pass<'o, 'p, R> {
    pub scheduler: &'o mut Scheduler,
    pub elements: &'o mut HashMap<ElementHandle, Key>,
    pub exiting: &'o mut IndexMap<ElementHandle, PendingExit>,
    pub renderer: &'o mut dyn Renderer,
    pub plan: &'p Plan<R>,
    /// Next binding table; starts with the update rows from reconciliation.
    pub table: BindingTable,
    pub sink: DiagnosticSink<'p>,
    pub report: ApplyReport,
}

impl<'o, 'p, R> Pass<'o, 'p, R> {
    pub(crate) fn updates(&mut self, updates: &[Update<'_, R>]) {
        let plan = self.plan;
        for u in updates {
            self.report.updated.push(u.key.clone());
            for (attr, rule) in plan.rules.iter() {
                match rule(u.record, u.index) {
                    Ok(value) => {
                        self.write(&u.key, u.element, attr, value, plan.update_transition, u.index)
                    }
                    Err(err) => self.sink.push(Diagnostic::rule_failed(
                        DiagnosticKind::RuleFailed,
                        &u.key,
                        attr,
                        &err,
                    )),
                }
            }
        }
    }

    pub(crate) fn enters(&mut self, enters: &[Enter<'_, R>]) {
        let plan = self.plan;
        for e in enters {
            let element = self.renderer.create(&plan.tag);
            self.table
                .insert(Binding::new(e.key.clone(), element, e.index));
            self.elements.insert(element, e.key.clone());
            self.report.entered.push(e.key.clone());

            for (attr, rule) in plan.enter.iter() {
                match rule(e.record, e.index) {
                    Ok(value) => self.write(&e.key, element, attr, value, None, e.index),
                    Err(err) => self.sink.push(Diagnostic::rule_failed(
                        DiagnosticKind::InitialRuleFailed,
                        &e.key,
                        attr,
                        &err,
                    )),
                }
            }
            for (attr, rule) in plan.rules.iter() {
                match rule(e.record, e.index) {
                    Ok(value) => {
                        self.write(&e.key, element, attr, value, plan.enter_transition, e.index)
                    }
                    Err(err) => self.sink.push(Diagnostic::rule_failed(
                        DiagnosticKind::RuleFailed,
                        &e.key,
                        attr,
                        &err,
                    )),
                }
            }
        }
    }

    pub(crate) fn exits(&mut self, exits: Vec<Binding>) {
        let plan = self.plan;
        for mut binding in exits {
            self.elements.remove(&binding.element);
            self.report.exited.push(binding.key.clone());

            let mut transitions = Vec::new();
            if let Some(cfg) = plan.exit_transition {
                for (attr, rule) in plan.exit.iter() {
                    let end = match rule(&binding) {
                        Ok(v) => v,
                        Err(err) => {
                            self.sink.push(Diagnostic::rule_failed(
                                DiagnosticKind::ExitRuleFailed,
                                &binding.key,
                                attr,
                                &err,
                            ));
                            continue;
                        }
                    };
                    match binding.attr(attr).cloned() {
                        Some(start) => {
                            let target = Target::new(binding.element, attr.clone());
                            let spec = cfg.spec(target, start, end, binding.index);
                            transitions.push(self.scheduler.schedule(spec));
                            self.report.scheduled += 1;
                        }
                        None => {
                            self.renderer.apply_value(binding.element, attr, &end);
                            binding.record(attr.clone(), end);
                            self.report.writes += 1;
                        }
                    }
                }
            }

            if transitions.is_empty() {
                self.scheduler.cancel_element(binding.element);
                self.renderer.remove(binding.element);
                self.report.removed.push(binding.element);
            } else {
                self.exiting.insert(
                    binding.element,
                    PendingExit {
                        binding,
                        transitions,
                    },
                );
            }
        }
    }

    /// Write one rule value, directly or through a transition.
    ///
    /// Unchanged values are skipped unless a transition is in flight on the
    /// target. A direct write cancels whatever transition is in flight.
    fn write(
        &mut self,
        key: &Key,
        element: ElementHandle,
        attr: &AttrKey,
        value: Value,
        cfg: Option<TransitionCfg>,
        index: usize,
    ) {
        let target = Target::new(element, attr.clone());
        let in_flight = self.scheduler.active_for(&target);
        let Some(binding) = self.table.get_mut(key) else {
            return;
        };

        if let Some(cfg) = cfg {
            let heading_there = match in_flight {
                Some(id) => self.scheduler.spec_of(id).map(|s| &s.end) == Some(&value),
                None => binding.attr(attr) == Some(&value),
            };
            if heading_there {
                return;
            }
            if let Some(start) = binding.attr(attr).cloned() {
                self.scheduler.schedule(cfg.spec(target, start, value, index));
                self.report.scheduled += 1;
                return;
            }
            if let Some(id) = in_flight {
                self.scheduler.cancel(id);
            }
        } else {
            match in_flight {
                Some(id) => {
                    self.scheduler.cancel(id);
                }
                None if binding.attr(attr) == Some(&value) => return,
                None => {}
            }
        }

        self.renderer.apply_value(element, attr, &value);
        binding.record(attr.clone(), value);
        self.report.writes += 1;
    }
}
