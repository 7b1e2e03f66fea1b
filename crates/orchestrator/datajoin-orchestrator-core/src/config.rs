use serde::{Deserialize, Serialize};

use datajoin_transition_core::SchedulerConfig;

use crate::diagnostics::DiagnosticsCfg;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    pub scheduler: SchedulerConfig,
    pub diagnostics: DiagnosticsCfg,
}
