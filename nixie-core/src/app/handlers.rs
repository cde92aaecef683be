//! Button handlers
//!
//! Clock personality:
//!
//! | Button | Single            | Long                | Sustain                    |
//! |--------|-------------------|---------------------|----------------------------|
//! | 1      | [`Clock::on_off`] | [`Clock::change_always_on`] |                    |
//! | 2      | [`Clock::inc_hour`] |                   | [`Clock::inc_hours`]       |
//! | 3      | [`Clock::inc_minute`] |                 | [`Clock::inc_minutes`]     |
//! | 4      | [`Clock::leds_next_mode`] |             | [`Clock::leds_change_brightness`] |
//!
//! The counter binds [`Clock::on_off`] and [`Clock::show_random`] to
//! buttons 1 and 2. In tube-test mode each button steps its own tube.

use oorandom::Rand32;

use super::state::Clock;
use super::{EDIT_ACCELERATE_AFTER_MS, EDIT_FAST_REPEAT_MS, EDIT_REPEAT_MS};
use crate::config::Personality;
use crate::counter::COUNTER_RANDOM_RANGE;
use crate::input::SustainEvent;
use crate::traits::{Board, LedStrip, NixieDisplay};

impl<B: Board> Clock<B> {
    /// Power the display, refreshing the auto-off timer
    pub fn on(&mut self) {
        if !self.state.is_on {
            #[cfg(feature = "defmt")]
            defmt::info!("display on");

            self.state.is_on = true;
            self.show();
        }
        self.state.on_time = self.state.now;
    }

    /// Blank tubes, dots and backlight
    pub fn off(&mut self) {
        if self.state.is_on {
            #[cfg(feature = "defmt")]
            defmt::info!("display off");

            self.state.is_on = false;
            NixieDisplay::blank(&mut self.board);
            self.set_dots(false);
            LedStrip::blank(&mut self.board);
        }
    }

    pub fn on_off(&mut self) {
        if self.state.is_on {
            self.off();
        } else {
            self.on();
        }
    }

    /// Toggle the always-on override
    pub fn change_always_on(&mut self) {
        self.on();
        self.state.always_on = !self.state.always_on;
        self.state.need_save_settings = true;

        #[cfg(feature = "defmt")]
        defmt::info!("always on: {}", self.state.always_on);
    }

    /// Check if auto-off is suspended right now
    pub fn is_always_on(&self) -> bool {
        self.state.always_on || self.config.schedule.is_on_at(&self.state.time)
    }

    pub fn inc_hour(&mut self) {
        self.on();
        self.state.time.inc_hour();
        self.show_time();
        self.state.need_save_time = true;
    }

    pub fn inc_minute(&mut self) {
        self.on();
        self.state.time.inc_minute();
        self.show_time();
        self.state.need_save_time = true;
    }

    /// Hold to advance the hour every 500 ms
    pub fn inc_hours(&mut self, event: SustainEvent) {
        self.begin_edit();

        if self.state.hour_repeat.ready(self.state.now) {
            self.state.time.inc_hour();
            self.show_time();
        }

        if event.is_final {
            self.end_edit();
        }
    }

    /// Hold to advance the minute, speeding up after two seconds
    pub fn inc_minutes(&mut self, event: SustainEvent) {
        self.begin_edit();

        if self.state.minute_repeat.ready(self.state.now) {
            let period = if event.elapsed < EDIT_ACCELERATE_AFTER_MS {
                EDIT_REPEAT_MS
            } else {
                EDIT_FAST_REPEAT_MS
            };
            self.state.minute_repeat.set_period(period);
            self.state.time.inc_minute();
            self.show_time();
        }

        if event.is_final {
            self.state.minute_repeat.set_period(EDIT_REPEAT_MS);
            self.end_edit();
        }
    }

    pub fn leds_next_mode(&mut self) {
        self.on();
        let _mode = self.state.leds.next_mode();
        self.state.need_save_settings = true;

        #[cfg(feature = "defmt")]
        defmt::info!("led mode: {}", _mode);
    }

    /// Hold to dim or brighten the backlight, alternating per hold
    pub fn leds_change_brightness(&mut self, event: SustainEvent) {
        self.on();
        let _brightness = self.state.leds.change_brightness(event.is_final);

        if event.is_final {
            self.state.need_save_settings = true;

            #[cfg(feature = "defmt")]
            defmt::info!("led brightness: {}", _brightness);
        }
    }

    fn begin_edit(&mut self) {
        self.on();
        self.set_dots(false);
        self.state.updating_time = true;
    }

    fn end_edit(&mut self) {
        self.state.need_save_time = true;
        self.state.updating_time = false;
    }

    /// Count toward a random value
    pub fn show_random(&mut self) {
        let now = self.state.now;
        let rng = self.rng.get_or_insert_with(|| Rand32::new(now as u64));
        let target = rng.rand_range(0..COUNTER_RANDOM_RANGE);
        self.state.counter.set_target(target);

        #[cfg(feature = "defmt")]
        defmt::debug!("counter target: {}", target);
    }

    pub fn inc_first_tube(&mut self) {
        self.inc_tube(0);
    }

    pub fn inc_second_tube(&mut self) {
        self.inc_tube(1);
    }

    pub fn inc_third_tube(&mut self) {
        self.inc_tube(2);
    }

    pub fn inc_fourth_tube(&mut self) {
        self.inc_tube(3);
    }

    fn inc_tube(&mut self, index: usize) {
        self.state.tube_test.inc(index);
        self.show_tube_test();
    }

    /// Redraw whatever the personality displays
    pub fn show(&mut self) {
        match self.config.personality {
            Personality::Clock => self.show_time(),
            Personality::Counter => self.show_counter(),
            Personality::Test => self.show_tube_test(),
        }
    }

    /// Show the counter value, right-aligned on the fitted tubes
    pub fn show_counter(&mut self) {
        let digits = self.state.counter.digits();
        let count = self.config.digit_count.count();
        self.board.write_digits(&digits[digits.len() - count..]);
    }

    fn show_tube_test(&mut self) {
        let digits = self.state.tube_test.digits();
        let count = self.config.digit_count.count();
        self.board.write_digits(&digits[..count]);
    }

    /// Show the local time on the fitted tubes
    pub fn show_time(&mut self) {
        let digits = self.state.time.digits();
        let count = self.config.digit_count.count();
        self.board.write_digits(&digits[..count]);
    }

    pub(super) fn set_dots(&mut self, on: bool) {
        if self.state.dots != on {
            self.state.dots = on;
            self.board.set_dots(on);
        }
    }
}
