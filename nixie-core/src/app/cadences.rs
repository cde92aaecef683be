//! Periodic actions run by the scheduler

use super::state::Clock;
use super::{ANTI_POISONING_STEPS, ANTI_POISONING_STEP_MS};
use crate::traits::{Board, LedStrip};

impl<B: Board> Clock<B> {
    /// Every second: advance the local time, auto-off, blink the dots
    pub fn seconds_tick(&mut self) {
        if self.state.updating_time {
            return;
        }

        self.state.time.tick(true);

        if let Some(delay) = self.config.auto_off_delay_ms() {
            let idle = self.state.now.wrapping_sub(self.state.on_time);
            if !self.is_always_on() && idle > delay {
                self.off();
            }
        }

        if self.state.is_on {
            self.show_time();
            self.set_dots(!self.state.dots);

            if let Some(delay) = self.config.anti_poisoning_delay_ms() {
                if self.state.now.wrapping_sub(self.state.anti_poisoning_time) > delay {
                    self.anti_poisoning();
                }
            }
        }
    }

    /// Write dirty settings and edited time back to storage
    pub fn settings_flush(&mut self) {
        if self.state.need_save_settings {
            self.save_settings();
        }
        if self.state.need_save_time && !self.state.updating_time {
            self.save_time();
        }
    }

    /// Pull the time from the RTC unless a local edit is pending
    pub fn clock_resync(&mut self) {
        if !self.state.updating_time && !self.state.need_save_time {
            self.load_time();
        }
    }

    /// Step the counter toward its target, redrawing on change
    pub fn counter_step(&mut self) {
        if self.state.counter.step() && self.state.is_on {
            self.show_counter();
        }
    }

    /// Render and push one backlight frame
    pub fn led_frame(&mut self) {
        if !self.state.is_on {
            return;
        }
        let count = self.config.led_count();
        let frame = &mut self.frame[..count];
        self.state.leds.step(frame);
        LedStrip::write(&mut self.board, frame, self.state.leds.brightness());
    }

    /// Cycle every cathode through 0-9 to prevent poisoning
    ///
    /// Blocks for about a second; every cadence and button stalls with it.
    /// The next cycle is measured from the start of this one, the pass
    /// timestamp, not from when the delay loop finished.
    pub fn anti_poisoning(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::info!("cathode anti-poisoning");

        let count = self.config.digit_count.count();
        for step in 0..ANTI_POISONING_STEPS {
            let digits = [step % 10; 6];
            self.board.write_digits(&digits[..count]);
            self.board.delay_ms(ANTI_POISONING_STEP_MS);
        }

        self.state.anti_poisoning_time = self.state.now;
        self.show_time();
    }

    pub(super) fn save_settings(&mut self) {
        let settings = self.state.settings();
        match self.board.save(&settings) {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::info!("settings saved: {}", settings);

                self.state.need_save_settings = false;
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("settings save failed: {}", _e);
            }
        }
    }

    pub(super) fn save_time(&mut self) {
        match self.board.write_time(self.state.time) {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::info!("time saved: {}", self.state.time);

                self.state.need_save_time = false;
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("time save failed: {}", _e);
            }
        }
    }

    pub(super) fn load_time(&mut self) {
        match self.board.read_time() {
            Ok(time) => self.state.time = time,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("rtc read failed: {}", _e);
            }
        }
    }
}
