//! Configuration type definitions
//!
//! These types select between the board variants of the clock: tube
//! count, digit order, how buttons are sampled, and the power behaviour.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::AlwaysOnSchedule;
use crate::input::{ButtonTiming, InputMode, DEFAULT_ANALOG_THRESHOLD};
use crate::leds::MAX_LEDS;
use crate::Millis;

/// Number of tubes fitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DigitCount {
    /// `HH MM`
    #[default]
    Four,
    /// `HH MM SS`
    Six,
}

impl DigitCount {
    pub const fn count(self) -> usize {
        match self {
            DigitCount::Four => 4,
            DigitCount::Six => 6,
        }
    }
}

impl TryFrom<u8> for DigitCount {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(DigitCount::Four),
            6 => Ok(DigitCount::Six),
            _ => Err(ConfigError::InvalidDigitCount),
        }
    }
}

impl From<DigitCount> for u8 {
    fn from(value: DigitCount) -> Self {
        value.count() as u8
    }
}

/// What the board does with its tubes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    /// RTC-backed wall clock with backlight and settings
    #[default]
    Clock,
    /// Counts toward a value written by an I2C master
    Counter,
    /// Each button steps one tube, for checking every cathode
    Test,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Only 4 and 6 tube boards exist
    InvalidDigitCount,
    /// Schedule has no entries
    EmptySchedule,
    /// First schedule entry does not start at 00:00
    ScheduleNotFromMidnight,
    /// Schedule entries are not in ascending time order
    ScheduleUnsorted,
    /// Schedule entry hour or minute out of range
    InvalidScheduleTime,
    /// LED count is zero or above the supported maximum
    LedCountOutOfRange,
    /// Sustain repeat interval is zero
    ZeroSustainInterval,
    /// Debounce window must end before sustain begins
    DebounceNotBelowSustainDelay,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigError::InvalidDigitCount => "digit_count must be 4 or 6",
            ConfigError::EmptySchedule => "schedule must have at least one entry",
            ConfigError::ScheduleNotFromMidnight => "first schedule entry must start at 00:00",
            ConfigError::ScheduleUnsorted => "schedule entries must be in ascending time order",
            ConfigError::InvalidScheduleTime => "schedule entry time out of range",
            ConfigError::LedCountOutOfRange => "led_count out of range",
            ConfigError::ZeroSustainInterval => "button.sustain_interval_ms must be non-zero",
            ConfigError::DebounceNotBelowSustainDelay => {
                "button.debounce_ms must be below button.sustain_delay_ms"
            }
        };
        f.write_str(msg)
    }
}

/// Complete clock configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub personality: Personality,
    /// Tubes fitted
    pub digit_count: DigitCount,
    /// Tubes are wired right to left
    pub invert_order: bool,
    /// How the buttons are sampled
    pub input_mode: InputMode,
    /// ADC level at or below which an analog button is pressed
    pub analog_threshold: u16,
    /// Gesture recognizer timing, shared by all buttons
    pub button: ButtonTiming,
    /// Seconds without interaction before the tubes turn off (0 = never)
    pub auto_off_delay_s: u32,
    /// Seconds between cathode anti-poisoning cycles (0 = never)
    pub anti_poisoning_delay_s: u32,
    /// LEDs in the backlight strip
    pub led_count: u8,
    /// When the display ignores auto-off
    pub schedule: AlwaysOnSchedule,
}

impl ClockConfig {
    /// Check the configuration for values the firmware cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let entries = self.schedule.entries();
        let first = entries.first().ok_or(ConfigError::EmptySchedule)?;
        if entries.iter().any(|e| e.hour >= 24 || e.minute >= 60) {
            return Err(ConfigError::InvalidScheduleTime);
        }
        if first.minutes_of_day() != 0 {
            return Err(ConfigError::ScheduleNotFromMidnight);
        }
        if entries
            .windows(2)
            .any(|pair| pair[0].minutes_of_day() >= pair[1].minutes_of_day())
        {
            return Err(ConfigError::ScheduleUnsorted);
        }

        if self.led_count == 0 || self.led_count as usize > MAX_LEDS {
            return Err(ConfigError::LedCountOutOfRange);
        }

        if self.button.sustain_interval_ms == 0 {
            return Err(ConfigError::ZeroSustainInterval);
        }
        if self.button.debounce_ms >= self.button.sustain_delay_ms {
            return Err(ConfigError::DebounceNotBelowSustainDelay);
        }

        Ok(())
    }

    /// Auto-off delay, `None` when disabled
    pub fn auto_off_delay_ms(&self) -> Option<Millis> {
        seconds_to_ms(self.auto_off_delay_s)
    }

    /// Anti-poisoning period, `None` when disabled
    pub fn anti_poisoning_delay_ms(&self) -> Option<Millis> {
        seconds_to_ms(self.anti_poisoning_delay_s)
    }

    pub fn led_count(&self) -> usize {
        (self.led_count as usize).min(MAX_LEDS)
    }
}

fn seconds_to_ms(seconds: u32) -> Option<Millis> {
    (seconds != 0).then(|| seconds.saturating_mul(1000))
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            personality: Personality::Clock,
            digit_count: DigitCount::Four,
            invert_order: false,
            input_mode: InputMode::Digital,
            analog_threshold: DEFAULT_ANALOG_THRESHOLD,
            button: ButtonTiming::default(),
            auto_off_delay_s: 600,
            anti_poisoning_delay_s: 1200,
            led_count: 4,
            schedule: AlwaysOnSchedule::default(),
        }
    }
}
