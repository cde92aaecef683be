//! Fire-from-last-fire interval timer

use crate::Millis;

/// Interval measured from the most recent fire
///
/// `ready` reports due when `now - last_fire >= period` and then moves
/// `last_fire` to `now`, not to `last_fire + period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Interval {
    period_ms: u32,
    last_fire: Millis,
}

impl Interval {
    /// Create an interval whose reference point is t = 0
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            last_fire: 0,
        }
    }

    /// Current period
    pub fn period(&self) -> u32 {
        self.period_ms
    }

    /// Change the period without touching the last-fire time
    pub fn set_period(&mut self, period_ms: u32) {
        self.period_ms = period_ms;
    }

    /// Timestamp of the most recent fire (or reset)
    pub fn last_fire(&self) -> Millis {
        self.last_fire
    }

    /// Earliest timestamp at which the interval is due again
    pub fn next_due(&self) -> Millis {
        self.last_fire.wrapping_add(self.period_ms)
    }

    /// Restart the interval from `now`
    pub fn reset(&mut self, now: Millis) {
        self.last_fire = now;
    }

    /// Check if due without consuming the fire
    pub fn is_due(&self, now: Millis) -> bool {
        now.wrapping_sub(self.last_fire) >= self.period_ms
    }

    /// Consume a fire if due
    pub fn ready(&mut self, now: Millis) -> bool {
        if self.is_due(now) {
            self.last_fire = now;
            true
        } else {
            false
        }
    }
}
