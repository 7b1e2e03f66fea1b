//! Per-apply diagnostics.
//!
//! Rule failures never abort an apply. Each failing (record, attribute) pair
//! becomes one `Diagnostic` in the report and, when enabled, a log line.

use serde::{Deserialize, Serialize};

use datajoin_api_core::AttrKey;
use datajoin_join_core::Key;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsCfg {
    /// Collect diagnostics into reports.
    pub enabled: bool,
    /// Mirror diagnostics to the `log` facade.
    pub log: bool,
}

impl Default for DiagnosticsCfg {
    fn default() -> Self {
        DiagnosticsCfg {
            enabled: true,
            log: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Positional apply: identity follows index, not data.
    MissingKeyFunction,
    /// An update/enter attribute rule failed.
    RuleFailed,
    /// An enter initial-value rule failed.
    InitialRuleFailed,
    /// An exit rule failed; the attribute is left as is.
    ExitRuleFailed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Key>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr: Option<AttrKey>,
    pub message: String,
}

impl Diagnostic {
    pub fn missing_key_function() -> Self {
        Diagnostic {
            severity: Severity::Warning,
            kind: DiagnosticKind::MissingKeyFunction,
            key: None,
            attr: None,
            message: "no key function given; records are joined by position".to_string(),
        }
    }

    pub fn rule_failed(kind: DiagnosticKind, key: &Key, attr: &AttrKey, err: &anyhow::Error) -> Self {
        Diagnostic {
            severity: Severity::Error,
            kind,
            key: Some(key.clone()),
            attr: Some(attr.clone()),
            message: format!("{err:#}"),
        }
    }

    /// Level used when mirroring to the `log` facade.
    pub fn log_level(&self) -> log::Level {
        match self.severity {
            Severity::Warning => log::Level::Warn,
            Severity::Error => log::Level::Error,
        }
    }
}

/// Collects diagnostics for one call according to `DiagnosticsCfg`.
#[derive(Debug)]
pub(crate) struct DiagnosticSink<'a> {
    cfg: &'a DiagnosticsCfg,
    out: Vec<Diagnostic>,
}

impl<'a> DiagnosticSink<'a> {
    pub(crate) fn new(cfg: &'a DiagnosticsCfg) -> Self {
        Self {
            cfg,
            out: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, d: Diagnostic) {
        if self.cfg.log {
            let level = d.log_level();
            match (&d.key, &d.attr) {
                (Some(key), Some(attr)) => {
                    log::log!(level, "rule for {attr} failed on key {key}: {}", d.message)
                }
                _ => log::log!(level, "{}", d.message),
            }
        }
        if self.cfg.enabled {
            self.out.push(d);
        }
    }

    pub(crate) fn finish(self) -> Vec<Diagnostic> {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_sink_collects_nothing() {
        let cfg = DiagnosticsCfg {
            enabled: false,
            log: false,
        };
        let mut sink = DiagnosticSink::new(&cfg);
        sink.push(Diagnostic::missing_key_function());
        assert!(sink.finish().is_empty());
    }

    #[test]
    fn rule_failure_keeps_error_chain() {
        let err = anyhow::anyhow!("field missing").context("score");
        let d = Diagnostic::rule_failed(
            DiagnosticKind::RuleFailed,
            &Key::from("a"),
            &AttrKey::attr("width"),
            &err,
        );
        assert_eq!(d.message, "score: field missing");
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["kind"], "rule_failed");
        assert_eq!(json["attr"], "width");
    }

    #[test]
    fn rule_failures_log_at_error() {
        let err = anyhow::anyhow!("boom");
        for kind in [
            DiagnosticKind::RuleFailed,
            DiagnosticKind::InitialRuleFailed,
            DiagnosticKind::ExitRuleFailed,
        ] {
            let d = Diagnostic::rule_failed(kind, &Key::Int(1), &AttrKey::Text, &err);
            assert_eq!(d.log_level(), log::Level::Error);
        }
        assert_eq!(Diagnostic::missing_key_function().log_level(), log::Level::Warn);
    }
}
