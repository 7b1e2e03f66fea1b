//! datajoin-scale-core
//!
//! Continuous scales mapping a numeric domain onto numeric or color ranges.
//! Scales are configured once and are pure afterwards, so one instance can be
//! shared by every reconciliation pass of a visualization.

pub mod config;
pub mod error;
pub mod scale;
pub mod ticks;

pub use config::{RangeInterpolation, ScaleConfig, ScaleMode};
pub use error::ScaleError;
pub use scale::Scale;
