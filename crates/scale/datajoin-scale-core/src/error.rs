use datajoin_api_core::ValueKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScaleError {
    #[error("Domain length ({domain_len}) does not match range length ({range_len})")]
    DomainRangeMismatch { domain_len: usize, range_len: usize },

    #[error("Scale needs at least two domain boundaries, got {0}")]
    TooFewBoundaries(usize),

    #[error("Domain boundary {0} is not finite")]
    NonFiniteDomain(f32),

    #[error("Domain must be strictly increasing or strictly decreasing: {0:?}")]
    NonMonotonicDomain(Vec<f32>),

    #[error("Log domain must not include or cross zero: {0:?}")]
    LogDomainCrossesZero(Vec<f32>),

    #[error("Invalid log base {0}")]
    InvalidLogBase(f32),

    #[error("Range value of kind {0:?} is not numeric")]
    NonNumericRange(ValueKind),

    #[error("Unsupported scale operation: {0}")]
    UnsupportedOperation(String),
}

impl ScaleError {
    /// True for errors raised while validating a domain/range configuration.
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            ScaleError::NonNumericRange(_) | ScaleError::UnsupportedOperation(_)
        )
    }
}
