//! datajoin-transition-core
//!
//! Eased attribute transitions advanced by an external clock. The scheduler
//! keeps at most one live transition per (element, attribute) target and
//! reports value changes and lifecycle events per tick; applying them to a
//! renderer is the caller's job.

pub mod config;
pub mod ease;
pub mod ids;
pub mod outputs;
pub mod scheduler;
pub mod ticker;
pub mod transition;

pub use config::SchedulerConfig;
pub use ease::Ease;
pub use ids::TransitionId;
pub use outputs::{Change, TickOutputs, TransitionEvent};
pub use scheduler::{CompletionHook, Scheduler};
pub use ticker::{FrameTicker, ManualTicker, SubscriptionId, TickListener};
pub use transition::{Completed, Target, TransitionSpec, TransitionState};
