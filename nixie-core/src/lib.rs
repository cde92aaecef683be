//! Board-agnostic core logic for the nixie clock firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Gesture recognizer turning sampled button levels into presses
//! - Cadence scheduler for the non-blocking super-loop
//! - Clock application (time keeping, power, LED animation, settings)
//! - Counter and tube-test personalities
//! - Collaborator traits (display, RTC, settings store, LED strip)
//! - Configuration type definitions
//!
//! Everything runs from a single execution context: one call to
//! [`app::Controller::run_pass`] polls every button, then fires whichever
//! cadences are due. Nothing here blocks except the anti-poisoning cycle,
//! which is a bounded ~1 s stall.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod app;
pub mod clock;
pub mod config;
pub mod counter;
pub mod input;
pub mod leds;
pub mod scheduler;
pub mod settings;
pub mod traits;

/// Millisecond timestamp from the free-running monotonic counter
///
/// Interval arithmetic always uses `wrapping_sub`, so a counter wrap is
/// harmless as long as no single interval exceeds ~49 days.
pub type Millis = u32;
