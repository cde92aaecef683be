//! Application state and the context handed to handlers

use oorandom::Rand32;
use rgb::RGB8;

use super::EDIT_REPEAT_MS;
use crate::clock::TimeOfDay;
use crate::config::ClockConfig;
use crate::counter::{CounterState, TubeTest};
use crate::leds::{LedAnimator, MAX_LEDS};
use crate::scheduler::Interval;
use crate::settings::Settings;
use crate::traits::Board;
use crate::Millis;

/// Mutable state of the clock
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AppState {
    /// Local copy of the time, kept in step by the seconds tick
    pub time: TimeOfDay,
    /// Separator dots lit
    pub dots: bool,
    /// A time-setting button is held; the tick and RTC sync stand back
    pub updating_time: bool,
    /// Tubes and backlight powered
    pub is_on: bool,
    /// Timestamp of the last interaction
    pub on_time: Millis,
    /// User override of the schedule
    pub always_on: bool,
    pub need_save_settings: bool,
    pub need_save_time: bool,
    pub leds: LedAnimator,
    /// Timestamp of the last anti-poisoning cycle
    pub anti_poisoning_time: Millis,
    /// Timestamp of the current pass
    pub now: Millis,
    /// Repeat gate while holding the hour button
    pub hour_repeat: Interval,
    /// Repeat gate while holding the minute button
    pub minute_repeat: Interval,
    /// Counter personality value
    pub counter: CounterState,
    /// Tube-test personality digits
    pub tube_test: TubeTest,
}

impl AppState {
    /// Power-on state
    ///
    /// The tubes count as on so the first `on()` only refreshes the
    /// interaction timestamp and leaves the boot zeros in place.
    pub fn new() -> Self {
        let settings = Settings::default();
        Self {
            time: TimeOfDay::default(),
            dots: false,
            updating_time: false,
            is_on: true,
            on_time: 0,
            always_on: settings.always_on,
            need_save_settings: false,
            need_save_time: false,
            leds: LedAnimator::new(settings.led_mode(), settings.brightness),
            anti_poisoning_time: 0,
            now: 0,
            hour_repeat: Interval::new(EDIT_REPEAT_MS),
            minute_repeat: Interval::new(EDIT_REPEAT_MS),
            counter: CounterState::new(),
            tube_test: TubeTest::new(),
        }
    }

    /// Apply persisted settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.always_on = settings.always_on;
        self.leds.set_mode(settings.led_mode());
        self.leds.set_brightness(settings.brightness);
    }

    /// Snapshot of the persisted part of the state
    pub fn settings(&self) -> Settings {
        Settings {
            always_on: self.always_on,
            led_mode: self.leds.mode().as_u8(),
            brightness: self.leds.brightness(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Context of every button handler and cadence action
pub struct Clock<B: Board> {
    pub(super) state: AppState,
    pub(super) config: ClockConfig,
    pub(super) board: B,
    pub(super) frame: [RGB8; MAX_LEDS],
    /// Seeded on first use from the pass timestamp
    pub(super) rng: Option<Rand32>,
}

impl<B: Board> Clock<B> {
    pub fn new(config: ClockConfig, board: B) -> Self {
        Self {
            state: AppState::new(),
            config,
            board,
            frame: [RGB8::default(); MAX_LEDS],
            rng: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    /// Last rendered backlight frame
    pub fn frame(&self) -> &[RGB8] {
        &self.frame[..self.config.led_count()]
    }
}
