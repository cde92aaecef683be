//! Cadence scheduler
//!
//! Owns the periodic actions of the application and fires whichever are due
//! on each pass. A pass never sleeps: it compares timestamps, runs the due
//! actions synchronously, and returns.

use heapless::Vec;

use super::interval::Interval;
use crate::Millis;

/// Default cadence capacity
pub const MAX_CADENCES: usize = 8;

/// Action run when a cadence is due
pub type CadenceAction<C> = fn(&mut C);

/// Handle returned when a cadence is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CadenceId(u8);

impl CadenceId {
    /// Registration index
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Errors from cadence registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerError {
    /// No room for another cadence
    Full,
}

/// A named, independently timed action
pub struct Cadence<C> {
    name: &'static str,
    interval: Interval,
    action: CadenceAction<C>,
}

impl<C> Cadence<C> {
    /// Create a cadence firing every `period_ms`
    pub const fn new(name: &'static str, period_ms: u32, action: CadenceAction<C>) -> Self {
        Self {
            name,
            interval: Interval::new(period_ms),
            action,
        }
    }

    /// Name used in logs
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Timing state
    pub fn interval(&self) -> &Interval {
        &self.interval
    }
}

/// Cooperative scheduler for up to `N` cadences
pub struct Scheduler<C, const N: usize = MAX_CADENCES> {
    cadences: Vec<Cadence<C>, N>,
}

impl<C, const N: usize> Scheduler<C, N> {
    /// Create an empty scheduler
    pub const fn new() -> Self {
        Self {
            cadences: Vec::new(),
        }
    }

    /// Register a cadence
    ///
    /// Cadences are registered once at startup and fire in registration
    /// order within a pass.
    pub fn add(&mut self, cadence: Cadence<C>) -> Result<CadenceId, SchedulerError> {
        let id = CadenceId(self.cadences.len() as u8);
        self.cadences
            .push(cadence)
            .map_err(|_| SchedulerError::Full)?;
        Ok(id)
    }

    /// Align every cadence to `now`, so the first fire is one period later
    pub fn start(&mut self, now: Millis) {
        for cadence in self.cadences.iter_mut() {
            cadence.interval.reset(now);
        }
    }

    /// Run one pass
    ///
    /// Fires each due cadence once, in registration order, and returns how
    /// many fired. An action that blocks stalls the whole pass; an action
    /// that never returns hangs the system.
    pub fn run_pass(&mut self, now: Millis, ctx: &mut C) -> usize {
        let mut fired = 0;
        for cadence in self.cadences.iter_mut() {
            if cadence.interval.ready(now) {
                #[cfg(feature = "defmt")]
                defmt::trace!("cadence {} at {}ms", cadence.name, now);

                (cadence.action)(ctx);
                fired += 1;
            }
        }
        fired
    }

    /// Number of registered cadences
    pub fn len(&self) -> usize {
        self.cadences.len()
    }

    /// Check if no cadence is registered
    pub fn is_empty(&self) -> bool {
        self.cadences.is_empty()
    }

    /// Look up a cadence
    pub fn get(&self, id: CadenceId) -> Option<&Cadence<C>> {
        self.cadences.get(id.index())
    }

    /// Timestamp of the cadence's most recent fire
    pub fn last_fire(&self, id: CadenceId) -> Option<Millis> {
        self.get(id).map(|c| c.interval.last_fire())
    }

    /// Earliest timestamp at which the cadence fires again
    pub fn next_due(&self, id: CadenceId) -> Option<Millis> {
        self.get(id).map(|c| c.interval.next_due())
    }
}

impl<C, const N: usize> Default for Scheduler<C, N> {
    fn default() -> Self {
        Self::new()
    }
}
