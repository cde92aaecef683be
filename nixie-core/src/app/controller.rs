//! Super-loop controller
//!
//! Owns the buttons, the scheduler and the clock context. The host loop
//! calls [`Controller::run_pass`] as often as it can.

use super::state::Clock;
use super::{CLOCK_RESYNC_MS, COUNTER_STEP_MS, LED_FRAME_MS, SECONDS_TICK_MS, SETTINGS_FLUSH_MS};
use crate::config::{ClockConfig, Personality};
use crate::input::Button;
use crate::scheduler::{Cadence, Scheduler, SchedulerError};
use crate::traits::{Board, InputSource};
use crate::Millis;

/// Physical buttons on the board
pub const BUTTON_COUNT: usize = 4;

/// Buttons, cadences and clock state of one clock
pub struct Controller<B: Board> {
    buttons: [Button<Clock<B>>; BUTTON_COUNT],
    scheduler: Scheduler<Clock<B>>,
    clock: Clock<B>,
}

impl<B: Board> Controller<B> {
    /// Wire the buttons and register the cadences of the configured
    /// personality
    pub fn new(config: ClockConfig, board: B) -> Result<Self, SchedulerError> {
        let timing = config.button;
        let mut buttons: [Button<Clock<B>>; BUTTON_COUNT] =
            core::array::from_fn(|_| Button::new(timing));
        let mut scheduler: Scheduler<Clock<B>> = Scheduler::new();

        match config.personality {
            Personality::Clock => {
                let [power, hours, minutes, leds] = &mut buttons;
                power.set_on_single(Clock::on_off);
                power.set_on_long(Clock::change_always_on);
                hours.set_on_single(Clock::inc_hour);
                hours.set_on_sustain(Clock::inc_hours);
                minutes.set_on_single(Clock::inc_minute);
                minutes.set_on_sustain(Clock::inc_minutes);
                leds.set_on_single(Clock::leds_next_mode);
                leds.set_on_sustain(Clock::leds_change_brightness);

                scheduler.add(Cadence::new("seconds_tick", SECONDS_TICK_MS, Clock::seconds_tick))?;
                scheduler.add(Cadence::new("settings_flush", SETTINGS_FLUSH_MS, Clock::settings_flush))?;
                scheduler.add(Cadence::new("clock_resync", CLOCK_RESYNC_MS, Clock::clock_resync))?;
                scheduler.add(Cadence::new("led_frame", LED_FRAME_MS, Clock::led_frame))?;
            }
            Personality::Counter => {
                buttons[0].set_on_single(Clock::on_off);
                buttons[1].set_on_single(Clock::show_random);

                scheduler.add(Cadence::new("counter_step", COUNTER_STEP_MS, Clock::counter_step))?;
                scheduler.add(Cadence::new("led_frame", LED_FRAME_MS, Clock::led_frame))?;
            }
            Personality::Test => {
                let [first, second, third, fourth] = &mut buttons;
                first.set_on_single(Clock::inc_first_tube);
                second.set_on_single(Clock::inc_second_tube);
                third.set_on_single(Clock::inc_third_tube);
                fourth.set_on_single(Clock::inc_fourth_tube);
            }
        }

        Ok(Self {
            buttons,
            scheduler,
            clock: Clock::new(config, board),
        })
    }

    /// Boot sequence
    ///
    /// Lights all tubes at zero with the dots on, restores settings and
    /// the RTC time, then aligns every cadence to `now`. Only the clock
    /// personality touches the settings store and the RTC.
    pub fn start(&mut self, now: Millis) {
        let clock = &mut self.clock;
        clock.state.now = now;
        clock.state.anti_poisoning_time = now;

        let count = clock.config.digit_count.count();
        clock.board.write_digits(&[0; 6][..count]);
        clock.set_dots(true);

        if clock.config.personality != Personality::Clock {
            #[cfg(feature = "defmt")]
            defmt::info!("starting as {}", clock.config.personality);

            clock.on();
            self.scheduler.start(now);
            return;
        }

        match clock.board.load() {
            Ok(Some(settings)) => {
                #[cfg(feature = "defmt")]
                defmt::info!("settings loaded: {}", settings);

                clock.state.apply_settings(&settings);
            }
            Ok(None) => {
                #[cfg(feature = "defmt")]
                defmt::info!("no stored settings, using defaults");
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("settings load failed: {}", _e);
            }
        }

        clock.load_time();

        #[cfg(feature = "defmt")]
        defmt::info!("time at boot: {}", clock.state.time);

        clock.on();
        self.scheduler.start(now);
    }

    /// Run one pass: poll every button, then fire the due cadences
    ///
    /// Returns the number of cadences fired.
    pub fn run_pass<I: InputSource>(&mut self, now: Millis, inputs: &mut I) -> usize {
        self.clock.state.now = now;

        for (index, button) in self.buttons.iter_mut().enumerate() {
            let pressed = inputs.is_pressed(index);
            button.poll(pressed, now, &mut self.clock);
        }

        self.scheduler.run_pass(now, &mut self.clock)
    }

    /// Set the value the counter walks toward
    pub fn set_counter_target(&mut self, target: u32) {
        self.clock.state.counter.set_target(target);

        #[cfg(feature = "defmt")]
        defmt::debug!("counter target: {}", self.clock.state.counter.target());
    }

    pub fn clock(&self) -> &Clock<B> {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Clock<B> {
        &mut self.clock
    }

    pub fn button(&self, index: usize) -> Option<&Button<Clock<B>>> {
        self.buttons.get(index)
    }

    pub fn scheduler(&self) -> &Scheduler<Clock<B>> {
        &self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::mock::{Levels, MockBoard};
    use crate::clock::{AlwaysOnSchedule, TimeOfDay};
    use crate::config::{DigitCount, Personality};
    use crate::counter::COUNTER_RANDOM_RANGE;
    use crate::input::ButtonState;
    use crate::leds::LedMode;
    use crate::settings::Settings;

    const STEP: Millis = 10;

    fn time(hour: u8, minute: u8, second: u8) -> TimeOfDay {
        TimeOfDay::new(hour, minute, second).unwrap()
    }

    fn controller(config: ClockConfig, board: MockBoard) -> Controller<MockBoard> {
        let mut ctrl = Controller::new(config, board).unwrap();
        ctrl.start(0);
        ctrl
    }

    fn six_tubes() -> ClockConfig {
        ClockConfig {
            digit_count: DigitCount::Six,
            ..Default::default()
        }
    }

    fn board_at(hour: u8, minute: u8, second: u8) -> MockBoard {
        MockBoard {
            rtc: time(hour, minute, second),
            ..Default::default()
        }
    }

    /// Run passes every 10 ms over `[from, to)`
    fn run(ctrl: &mut Controller<MockBoard>, levels: &mut Levels, from: Millis, to: Millis) {
        let mut now = from;
        while now < to {
            ctrl.run_pass(now, levels);
            now += STEP;
        }
    }

    /// Hold `button` over `[from, to)`, then release it until `settle`
    fn hold(ctrl: &mut Controller<MockBoard>, button: usize, from: Millis, to: Millis, settle: Millis) {
        let mut levels = Levels::default();
        levels.0[button] = true;
        run(ctrl, &mut levels, from, to);
        levels.0[button] = false;
        run(ctrl, &mut levels, to, settle);
    }

    #[test]
    fn test_boot_restores_state() {
        let mut board = board_at(12, 34, 56);
        board.stored = Some(Settings {
            always_on: false,
            led_mode: LedMode::Cyan.as_u8(),
            brightness: 80,
        });
        let ctrl = controller(six_tubes(), board);

        let clock = ctrl.clock();
        assert_eq!(clock.board().digits[0], [0; 6]);
        assert!(clock.board().dots);
        assert_eq!(clock.state().time, time(12, 34, 56));
        assert!(!clock.state().always_on);
        assert_eq!(clock.state().leds.mode(), LedMode::Cyan);
        assert_eq!(clock.state().leds.brightness(), 80);
        assert!(clock.state().is_on);
        assert_eq!(ctrl.scheduler().len(), 4);
    }

    #[test]
    fn test_boot_without_rtc() {
        let mut board = MockBoard::default();
        board.rtc_fail = true;
        let ctrl = controller(ClockConfig::default(), board);
        assert_eq!(ctrl.clock().state().time, TimeOfDay::default());
        assert_eq!(ctrl.clock().board().rtc_reads, 1);
    }

    #[test]
    fn test_seconds_tick() {
        let mut ctrl = controller(six_tubes(), board_at(9, 0, 0));
        run(&mut ctrl, &mut Levels::default(), 0, 1010);

        let clock = ctrl.clock();
        assert_eq!(clock.state().time, time(9, 0, 1));
        assert_eq!(clock.board().last_digits(), [0, 9, 0, 0, 0, 1]);
        // Dots were lit at boot, the tick toggles them
        assert!(!clock.board().dots);
    }

    #[test]
    fn test_four_digit_display() {
        let mut ctrl = controller(ClockConfig::default(), board_at(21, 7, 0));
        assert_eq!(ctrl.clock().board().digits[0], [0; 4]);
        run(&mut ctrl, &mut Levels::default(), 0, 1010);
        assert_eq!(ctrl.clock().board().last_digits(), [2, 1, 0, 7]);
    }

    #[test]
    fn test_single_press_toggles_power() {
        let mut ctrl = controller(ClockConfig::default(), board_at(9, 0, 0));

        hold(&mut ctrl, 0, 2000, 2100, 2500);
        let clock = ctrl.clock();
        assert!(!clock.state().is_on);
        assert_eq!(clock.board().blanks, 1);
        assert_eq!(clock.board().led_blanks, 1);
        assert!(!clock.board().dots);

        // No frames while off
        let frames = clock.board().frames.len();
        run(&mut ctrl, &mut Levels::default(), 2500, 3000);
        assert_eq!(ctrl.clock().board().frames.len(), frames);

        hold(&mut ctrl, 0, 3000, 3100, 3500);
        let clock = ctrl.clock();
        assert!(clock.state().is_on);
        assert_eq!(clock.state().on_time, 3400);
    }

    #[test]
    fn test_double_press_is_unbound() {
        let mut ctrl = controller(ClockConfig::default(), board_at(9, 0, 0));
        let mut levels = Levels::default();

        levels.0[0] = true;
        run(&mut ctrl, &mut levels, 2000, 2050);
        levels.0[0] = false;
        run(&mut ctrl, &mut levels, 2050, 2100);
        levels.0[0] = true;
        run(&mut ctrl, &mut levels, 2100, 2150);
        levels.0[0] = false;
        run(&mut ctrl, &mut levels, 2150, 2800);

        assert!(ctrl.clock().state().is_on);
        assert_eq!(ctrl.clock().board().blanks, 0);
        assert_eq!(ctrl.button(0).map(|b| b.state()), Some(ButtonState::Idle));
    }

    #[test]
    fn test_long_press_toggles_always_on() {
        let mut ctrl = controller(ClockConfig::default(), board_at(9, 0, 0));

        hold(&mut ctrl, 0, 2000, 2500, 2600);
        assert!(!ctrl.clock().state().always_on);
        assert!(ctrl.clock().state().need_save_settings);

        run(&mut ctrl, &mut Levels::default(), 2600, 10_010);
        let clock = ctrl.clock();
        assert!(!clock.state().need_save_settings);
        assert_eq!(clock.board().stored.map(|s| s.always_on), Some(false));
    }

    #[test]
    fn test_failed_save_is_retried() {
        let mut board = board_at(9, 0, 0);
        board.save_fail = true;
        let mut ctrl = controller(ClockConfig::default(), board);

        hold(&mut ctrl, 0, 2000, 2500, 2600);
        run(&mut ctrl, &mut Levels::default(), 2600, 10_010);
        assert_eq!(ctrl.clock().board().save_attempts, 1);
        assert!(ctrl.clock().state().need_save_settings);

        ctrl.clock_mut().board_mut().save_fail = false;
        run(&mut ctrl, &mut Levels::default(), 10_010, 20_010);
        assert_eq!(ctrl.clock().board().save_attempts, 2);
        assert!(!ctrl.clock().state().need_save_settings);
    }

    #[test]
    fn test_single_press_increments_hour_and_minute() {
        let mut ctrl = controller(ClockConfig::default(), board_at(23, 59, 0));

        hold(&mut ctrl, 1, 2000, 2100, 2500);
        hold(&mut ctrl, 2, 2500, 2600, 3000);

        let state = ctrl.clock().state();
        // Wraps without carrying
        assert_eq!(state.time.hour, 0);
        assert_eq!(state.time.minute, 0);
        assert!(state.need_save_time);
    }

    #[test]
    fn test_hold_advances_hours() {
        let mut ctrl = controller(ClockConfig::default(), board_at(9, 0, 0));

        hold(&mut ctrl, 1, 10_000, 12_500, 12_600);
        let state = ctrl.clock().state();
        assert_eq!(state.time.hour, 12);
        assert!(!state.updating_time);
        assert!(state.need_save_time);

        run(&mut ctrl, &mut Levels::default(), 12_600, 20_010);
        let clock = ctrl.clock();
        assert!(!clock.state().need_save_time);
        assert_eq!(clock.board().rtc_writes.last().map(|t| t.hour), Some(12));
    }

    #[test]
    fn test_hold_freezes_tick() {
        let mut ctrl = controller(ClockConfig::default(), board_at(9, 0, 0));
        let mut levels = Levels::default();
        levels.0[1] = true;

        run(&mut ctrl, &mut levels, 0, 11_100);
        let second = ctrl.clock().state().time.second;
        assert!(ctrl.clock().state().updating_time);

        run(&mut ctrl, &mut levels, 11_100, 14_000);
        assert_eq!(ctrl.clock().state().time.second, second);
        assert!(!ctrl.clock().board().dots);
    }

    #[test]
    fn test_hold_accelerates_minutes() {
        let mut ctrl = controller(ClockConfig::default(), board_at(9, 0, 0));

        hold(&mut ctrl, 2, 10_000, 14_000, 14_100);
        let state = ctrl.clock().state();
        // Five steps at 500 ms, then three at 100 ms once held past 2 s
        assert_eq!(state.time.minute, 8);
        assert_eq!(state.time.hour, 9);
        assert_eq!(state.minute_repeat.period(), 500);
    }

    #[test]
    fn test_hold_changes_brightness() {
        let mut ctrl = controller(ClockConfig::default(), board_at(9, 0, 0));

        hold(&mut ctrl, 3, 10_000, 11_200, 11_300);
        assert_eq!(ctrl.clock().state().leds.brightness(), 175);
        assert!(ctrl.clock().state().need_save_settings);

        run(&mut ctrl, &mut Levels::default(), 11_300, 20_010);
        assert_eq!(ctrl.clock().board().stored.map(|s| s.brightness), Some(175));
    }

    #[test]
    fn test_single_press_cycles_led_mode() {
        let mut ctrl = controller(ClockConfig::default(), board_at(9, 0, 0));

        hold(&mut ctrl, 3, 2000, 2100, 2500);
        assert_eq!(ctrl.clock().state().leds.mode(), LedMode::Rainbow2);
        assert!(ctrl.clock().state().need_save_settings);
    }

    #[test]
    fn test_led_frames() {
        let mut ctrl = controller(ClockConfig::default(), board_at(9, 0, 0));
        run(&mut ctrl, &mut Levels::default(), 0, 110);

        let frames = &ctrl.clock().board().frames;
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].0.len(), 4);
        assert_eq!(frames[0].1, 255);
        assert_ne!(frames[0].0, frames[1].0);
    }

    #[test]
    fn test_auto_off() {
        let config = ClockConfig {
            auto_off_delay_s: 5,
            schedule: AlwaysOnSchedule::never(),
            ..Default::default()
        };
        let mut board = board_at(9, 0, 0);
        board.stored = Some(Settings {
            always_on: false,
            ..Default::default()
        });
        let mut ctrl = controller(config, board);

        run(&mut ctrl, &mut Levels::default(), 0, 5010);
        assert!(ctrl.clock().state().is_on);
        run(&mut ctrl, &mut Levels::default(), 5010, 6010);
        assert!(!ctrl.clock().state().is_on);
    }

    #[test]
    fn test_schedule_suspends_auto_off() {
        let config = ClockConfig {
            auto_off_delay_s: 5,
            ..Default::default()
        };
        let mut board = board_at(12, 0, 0);
        board.stored = Some(Settings {
            always_on: false,
            ..Default::default()
        });
        let mut ctrl = controller(config, board);

        run(&mut ctrl, &mut Levels::default(), 0, 10_010);
        assert!(ctrl.clock().is_always_on());
        assert!(ctrl.clock().state().is_on);
    }

    #[test]
    fn test_anti_poisoning() {
        let config = ClockConfig {
            anti_poisoning_delay_s: 2,
            ..six_tubes()
        };
        let mut ctrl = controller(config, board_at(9, 0, 0));

        run(&mut ctrl, &mut Levels::default(), 0, 2010);
        assert_eq!(ctrl.clock().board().delayed_ns, 0);

        run(&mut ctrl, &mut Levels::default(), 2010, 3010);
        let clock = ctrl.clock();
        assert_eq!(clock.board().delayed_ns, 1_000_000_000);
        assert_eq!(clock.state().anti_poisoning_time, 3000);
        assert!(clock.board().digits.iter().any(|d| d.as_slice() == [7; 6]));
        assert_eq!(clock.board().last_digits(), [0, 9, 0, 0, 0, 3]);
    }

    #[test]
    fn test_resync_skipped_while_time_dirty() {
        let mut ctrl = controller(ClockConfig::default(), board_at(9, 0, 0));
        let clock = ctrl.clock_mut();

        clock.board_mut().rtc = time(10, 30, 0);
        clock.state.need_save_time = true;
        clock.clock_resync();
        assert_eq!(clock.state().time, time(9, 0, 0));

        clock.state.need_save_time = false;
        clock.clock_resync();
        assert_eq!(clock.state().time, time(10, 30, 0));
    }

    fn personality(personality: Personality) -> ClockConfig {
        ClockConfig {
            personality,
            digit_count: DigitCount::Six,
            ..Default::default()
        }
    }

    #[test]
    fn test_counter_walks_to_target() {
        let mut ctrl = controller(personality(Personality::Counter), board_at(9, 0, 0));
        assert_eq!(ctrl.scheduler().len(), 2);
        assert_eq!(ctrl.clock().board().rtc_reads, 0);

        ctrl.set_counter_target(3);
        run(&mut ctrl, &mut Levels::default(), 0, 410);
        assert_eq!(ctrl.clock().state().counter.current(), 2);
        assert_eq!(ctrl.clock().board().last_digits(), [0, 0, 0, 0, 0, 2]);

        run(&mut ctrl, &mut Levels::default(), 410, 2010);
        let clock = ctrl.clock();
        assert_eq!(clock.state().counter.current(), 3);
        assert_eq!(clock.board().last_digits(), [0, 0, 0, 0, 0, 3]);
        // No seconds tick in counter mode
        assert_eq!(clock.state().time, TimeOfDay::default());
    }

    #[test]
    fn test_counter_on_four_tubes() {
        let config = ClockConfig {
            personality: Personality::Counter,
            ..Default::default()
        };
        let mut ctrl = controller(config, MockBoard::default());
        ctrl.set_counter_target(12);
        run(&mut ctrl, &mut Levels::default(), 0, 2410);
        assert_eq!(ctrl.clock().board().last_digits(), [0, 0, 1, 2]);
    }

    #[test]
    fn test_counter_random_target() {
        let mut ctrl = controller(personality(Personality::Counter), MockBoard::default());

        hold(&mut ctrl, 1, 2000, 2100, 2500);
        let target = ctrl.clock().state().counter.target();
        assert!(target < COUNTER_RANDOM_RANGE);

        // Steps continue while off but nothing is drawn
        hold(&mut ctrl, 0, 2500, 2600, 3000);
        assert!(!ctrl.clock().state().is_on);
        let writes = ctrl.clock().board().digits.len();
        run(&mut ctrl, &mut Levels::default(), 3000, 3410);
        assert_eq!(ctrl.clock().board().digits.len(), writes);
    }

    #[test]
    fn test_tube_test_increments() {
        let mut ctrl = controller(personality(Personality::Test), board_at(9, 0, 0));
        assert_eq!(ctrl.scheduler().len(), 0);
        assert_eq!(ctrl.clock().board().rtc_reads, 0);

        hold(&mut ctrl, 0, 2000, 2100, 2500);
        hold(&mut ctrl, 3, 2500, 2600, 3000);
        hold(&mut ctrl, 3, 3000, 3100, 3500);
        assert_eq!(ctrl.clock().board().last_digits(), [1, 0, 0, 2, 0, 0]);
    }
}
