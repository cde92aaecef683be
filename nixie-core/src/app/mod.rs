//! Clock application
//!
//! Wires four gesture recognizers and the cadence scheduler to the clock
//! state. Handlers and cadence actions are methods on [`Clock`], which
//! owns the application state and the board collaborators.

pub mod cadences;
pub mod controller;
pub mod handlers;
pub mod state;

pub use controller::{Controller, BUTTON_COUNT};
pub use state::{AppState, Clock};

/// Seconds tick period
pub const SECONDS_TICK_MS: u32 = 1000;

/// Settings and time write-back period
pub const SETTINGS_FLUSH_MS: u32 = 10_000;

/// RTC resynchronisation period
pub const CLOCK_RESYNC_MS: u32 = 10 * 60 * 1000;

/// Counter step period
pub const COUNTER_STEP_MS: u32 = 200;

/// LED animation frame period
pub const LED_FRAME_MS: u32 = 50;

/// Repeat period while holding a time-setting button
pub const EDIT_REPEAT_MS: u32 = 500;

/// Accelerated repeat period for minutes
pub const EDIT_FAST_REPEAT_MS: u32 = 100;

/// Hold time after which minutes accelerate
pub const EDIT_ACCELERATE_AFTER_MS: u32 = 2000;

/// Steps of the anti-poisoning cycle (ten passes over 0-9)
pub const ANTI_POISONING_STEPS: u8 = 100;

/// Delay between anti-poisoning steps
pub const ANTI_POISONING_STEP_MS: u32 = 10;

#[cfg(test)]
pub(crate) mod mock;
