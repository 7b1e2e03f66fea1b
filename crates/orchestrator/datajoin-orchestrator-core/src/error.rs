use thiserror::Error;

use datajoin_api_core::AttrKeyError;
use datajoin_join_core::JoinError;

use crate::plan::JoinMode;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Reconciliation failed; nothing was rendered.
    #[error(transparent)]
    Join(#[from] JoinError),

    #[error("orchestrator is bound in {established} mode; {requested} apply rejected")]
    MixedJoinMode {
        established: JoinMode,
        requested: JoinMode,
    },

    #[error("invalid attribute key: {0}")]
    InvalidAttribute(#[from] AttrKeyError),

    #[error("attribute '{0}' already has a rule")]
    DuplicateRule(String),
}
