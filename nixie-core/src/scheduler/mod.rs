//! Cooperative cadence scheduler
//!
//! Runs a fixed set of independently timed actions from one non-blocking
//! pass. Each cadence tracks its own last-fire time, so a late pass delays
//! that cadence once instead of compounding drift.

pub mod executor;
pub mod interval;

pub use executor::{Cadence, CadenceId, Scheduler, SchedulerError, MAX_CADENCES};
pub use interval::Interval;
