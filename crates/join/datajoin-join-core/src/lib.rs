//! datajoin-join-core
//!
//! Keyed reconciliation of record snapshots against the elements bound by the
//! previous pass. Output is a plain partition (updates, enters, exits) plus the
//! binding table the caller should persist once it has acted on it.

pub mod binding;
pub mod error;
pub mod join;
pub mod key;

pub use binding::{Binding, BindingTable};
pub use error::JoinError;
pub use join::{reconcile, reconcile_positional, Enter, Join, Update};
pub use key::Key;
