//! Gestures emitted by the recognizer and the timing that classifies them

use serde::{Deserialize, Serialize};

/// Analog level at or below which an analog button counts as pressed
pub const DEFAULT_ANALOG_THRESHOLD: u16 = 200;

/// A classified press/release sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// Short tap, confirmed once the double-press window expired
    Single,
    /// Held past the debounce window, released before sustain began
    Long,
    /// Two taps within the debounce window
    Double,
    /// Auto-repeat while held, plus one final event on release
    Sustain(SustainEvent),
}

impl Gesture {
    /// Check if this gesture ends a press cycle
    ///
    /// Every cycle ends with exactly one terminal gesture. Only the
    /// periodic (non-final) sustain repeats are not terminal.
    pub fn is_terminal(&self) -> bool {
        match self {
            Gesture::Sustain(event) => event.is_final,
            _ => true,
        }
    }
}

/// Payload of a sustain callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SustainEvent {
    /// Set on the event fired by the release
    pub is_final: bool,
    /// Repeat count or approximate held time, depending on [`SustainPolicy`]
    pub elapsed: u32,
}

/// How the sustain counter starts and what the callback receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SustainPolicy {
    /// Counter starts at 0, callback gets the raw repeat count
    RawCount,
    /// Counter starts at 1, callback gets `count * sustain_interval_ms`
    #[default]
    ScaledElapsed,
}

impl SustainPolicy {
    /// Counter value on entering sustain
    pub const fn initial_count(self) -> u32 {
        match self {
            SustainPolicy::RawCount => 0,
            SustainPolicy::ScaledElapsed => 1,
        }
    }

    /// Value handed to the sustain callback for a given counter
    pub const fn elapsed(self, count: u32, interval_ms: u32) -> u32 {
        match self {
            SustainPolicy::RawCount => count,
            SustainPolicy::ScaledElapsed => count.saturating_mul(interval_ms),
        }
    }
}

/// Recognizer timing constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonTiming {
    /// Short/long threshold, also the double-press grace period
    pub debounce_ms: u32,
    /// Hold time before auto-repeat begins
    pub sustain_delay_ms: u32,
    /// Auto-repeat period
    pub sustain_interval_ms: u32,
    /// Sustain counter policy
    pub sustain_policy: SustainPolicy,
}

impl ButtonTiming {
    /// Timing of the first board revision: 40 ms repeat, raw counts
    pub const LEGACY: Self = Self {
        debounce_ms: 300,
        sustain_delay_ms: 1000,
        sustain_interval_ms: 40,
        sustain_policy: SustainPolicy::RawCount,
    };

    /// Value passed to the sustain callback for `count`
    pub const fn sustain_elapsed(&self, count: u32) -> u32 {
        self.sustain_policy.elapsed(count, self.sustain_interval_ms)
    }
}

impl Default for ButtonTiming {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            sustain_delay_ms: 1000,
            sustain_interval_ms: 50,
            sustain_policy: SustainPolicy::ScaledElapsed,
        }
    }
}

/// How a button's level is sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Active-low GPIO with pull-up
    #[default]
    Digital,
    /// ADC reading compared against a threshold
    Analog,
}

/// Convert an analog sample into a pressed level
pub const fn is_analog_pressed(value: u16, threshold: u16) -> bool {
    value <= threshold
}
