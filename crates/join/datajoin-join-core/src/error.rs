use thiserror::Error;

use crate::key::Key;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    /// Two records in one snapshot produced the same key.
    #[error("duplicate key {key} at snapshot positions {first} and {second}")]
    DuplicateKey { key: Key, first: usize, second: usize },
}
