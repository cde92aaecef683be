//! Per-button gesture state machine
//!
//! The recognizer is total over its input: every `(pressed, now)` sample
//! produces a defined transition and at most one callback.
//!
//! ```text
//!            press                 held > sustain delay
//!   Idle ──────────────► Single ─────────────────────► Sustain ──┐
//!    ▲                    │  ▲                           │  ▲      │ held > interval
//!    │   release, long    │  │ press (double pending)    │  └──────┘ (repeat)
//!    ├────────────────────┘  │                           │
//!    │                       │      release (final)      │
//!    ├───────────────────────┼───────────────────────────┘
//!    │                       │
//!    │  window expired /     │ release < debounce
//!    └─── double ─────── Release ◄───── (from Single)
//! ```

use super::gesture::{ButtonTiming, Gesture, SustainEvent};
use crate::Millis;

/// Handler for single, long and double presses
pub type PressHandler<C> = fn(&mut C);

/// Handler for sustain repeats
pub type SustainHandler<C> = fn(&mut C, SustainEvent);

/// Recognizer phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// Not pressed, nothing pending
    #[default]
    Idle,
    /// Pressed, not yet classified
    Single,
    /// Held long enough to auto-repeat
    Sustain,
    /// Released after a short tap, waiting out the double-press window
    Release,
}

/// Gesture recognizer for one physical button
///
/// `C` is the application context handed to every handler, so handlers are
/// plain functions operating on explicit state rather than globals.
pub struct Button<C> {
    state: ButtonState,
    /// Timestamp of the last phase transition
    press_time: Millis,
    sustain_count: u32,
    is_double_pending: bool,
    timing: ButtonTiming,
    on_single: Option<PressHandler<C>>,
    on_long: Option<PressHandler<C>>,
    on_double: Option<PressHandler<C>>,
    on_sustain: Option<SustainHandler<C>>,
}

impl<C> Button<C> {
    /// Create a recognizer with no handlers bound
    pub const fn new(timing: ButtonTiming) -> Self {
        Self {
            state: ButtonState::Idle,
            press_time: 0,
            sustain_count: 0,
            is_double_pending: false,
            timing,
            on_single: None,
            on_long: None,
            on_double: None,
            on_sustain: None,
        }
    }

    pub fn set_on_single(&mut self, handler: PressHandler<C>) {
        self.on_single = Some(handler);
    }

    pub fn set_on_long(&mut self, handler: PressHandler<C>) {
        self.on_long = Some(handler);
    }

    pub fn set_on_double(&mut self, handler: PressHandler<C>) {
        self.on_double = Some(handler);
    }

    pub fn set_on_sustain(&mut self, handler: SustainHandler<C>) {
        self.on_sustain = Some(handler);
    }

    /// Current phase
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Timestamp of the last phase transition
    pub fn press_time(&self) -> Millis {
        self.press_time
    }

    /// Sustain repeat counter (0 outside a sustain cycle)
    pub fn sustain_count(&self) -> u32 {
        self.sustain_count
    }

    /// Check if the next release will be classified as a double press
    pub fn is_double_pending(&self) -> bool {
        self.is_double_pending
    }

    /// Timing this recognizer classifies with
    pub fn timing(&self) -> &ButtonTiming {
        &self.timing
    }

    /// Feed one sample
    ///
    /// Must be called at least as often as the shortest timing constant,
    /// in practice once per loop pass. Invokes at most one handler and
    /// returns the gesture it classified, if any.
    pub fn poll(&mut self, is_pressed: bool, now: Millis, ctx: &mut C) -> Option<Gesture> {
        let held = now.wrapping_sub(self.press_time);

        let gesture = if is_pressed {
            self.pressed(now, held)
        } else {
            self.released(now, held)
        }?;

        #[cfg(feature = "defmt")]
        defmt::debug!("button gesture {} at {}ms", gesture, now);

        self.dispatch(gesture, ctx);
        Some(gesture)
    }

    fn pressed(&mut self, now: Millis, held: u32) -> Option<Gesture> {
        match self.state {
            ButtonState::Idle | ButtonState::Release => {
                // A press while still inside the grace period makes the
                // next release a double press
                if self.state == ButtonState::Release {
                    self.is_double_pending = true;
                }
                self.press_time = now;
                self.state = ButtonState::Single;
                None
            }
            ButtonState::Single => {
                if held <= self.timing.sustain_delay_ms {
                    return None;
                }
                self.sustain_count = self.timing.sustain_policy.initial_count();
                self.press_time = now;
                self.state = ButtonState::Sustain;
                Some(self.sustain(false))
            }
            ButtonState::Sustain => {
                if held <= self.timing.sustain_interval_ms {
                    return None;
                }
                self.sustain_count = self.sustain_count.saturating_add(1);
                self.press_time = now;
                Some(self.sustain(false))
            }
        }
    }

    fn released(&mut self, now: Millis, held: u32) -> Option<Gesture> {
        match self.state {
            ButtonState::Idle => None,
            ButtonState::Single => {
                if held < self.timing.debounce_ms {
                    self.press_time = now;
                    self.state = ButtonState::Release;
                    None
                } else {
                    self.finish();
                    Some(Gesture::Long)
                }
            }
            ButtonState::Sustain => {
                self.sustain_count = self.sustain_count.saturating_add(1);
                let gesture = self.sustain(true);
                self.finish();
                Some(gesture)
            }
            ButtonState::Release => {
                if self.is_double_pending {
                    self.finish();
                    Some(Gesture::Double)
                } else if held >= self.timing.debounce_ms {
                    self.finish();
                    Some(Gesture::Single)
                } else {
                    None
                }
            }
        }
    }

    fn sustain(&self, is_final: bool) -> Gesture {
        Gesture::Sustain(SustainEvent {
            is_final,
            elapsed: self.timing.sustain_elapsed(self.sustain_count),
        })
    }

    /// Return to idle, dropping all per-cycle state
    fn finish(&mut self) {
        self.state = ButtonState::Idle;
        self.sustain_count = 0;
        self.is_double_pending = false;
    }

    fn dispatch(&self, gesture: Gesture, ctx: &mut C) {
        match gesture {
            Gesture::Single => {
                if let Some(handler) = self.on_single {
                    handler(ctx);
                }
            }
            Gesture::Long => {
                if let Some(handler) = self.on_long {
                    handler(ctx);
                }
            }
            Gesture::Double => {
                if let Some(handler) = self.on_double {
                    handler(ctx);
                }
            }
            Gesture::Sustain(event) => {
                if let Some(handler) = self.on_sustain {
                    handler(ctx, event);
                }
            }
        }
    }
}

impl<C> Default for Button<C> {
    fn default() -> Self {
        Self::new(ButtonTiming::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::gesture::SustainPolicy;
    use heapless::Vec;
    use proptest::prelude::*;

    /// Records every handler invocation
    #[derive(Default)]
    struct Recorder {
        events: Vec<Gesture, 128>,
    }

    impl Recorder {
        fn count(&self, gesture: Gesture) -> usize {
            self.events.iter().filter(|g| **g == gesture).count()
        }

        fn sustains(&self) -> impl Iterator<Item = SustainEvent> + '_ {
            self.events.iter().filter_map(|g| match g {
                Gesture::Sustain(e) => Some(*e),
                _ => None,
            })
        }
    }

    fn single(ctx: &mut Recorder) {
        let _ = ctx.events.push(Gesture::Single);
    }

    fn long(ctx: &mut Recorder) {
        let _ = ctx.events.push(Gesture::Long);
    }

    fn double(ctx: &mut Recorder) {
        let _ = ctx.events.push(Gesture::Double);
    }

    fn sustain(ctx: &mut Recorder, event: SustainEvent) {
        let _ = ctx.events.push(Gesture::Sustain(event));
    }

    fn wired(timing: ButtonTiming) -> Button<Recorder> {
        let mut button = Button::new(timing);
        button.set_on_single(single);
        button.set_on_long(long);
        button.set_on_double(double);
        button.set_on_sustain(sustain);
        button
    }

    /// Hold the button from `from` to `to` (exclusive), sampling every `step` ms
    fn hold(button: &mut Button<Recorder>, ctx: &mut Recorder, from: u32, to: u32, step: u32) {
        let mut t = from;
        while t < to {
            button.poll(true, t, ctx);
            t += step;
        }
    }

    #[test]
    fn test_single_press_scenario() {
        let mut button = wired(ButtonTiming::default());
        let mut rec = Recorder::default();

        button.poll(true, 0, &mut rec);
        assert_eq!(button.state(), ButtonState::Single);

        button.poll(false, 150, &mut rec);
        assert_eq!(button.state(), ButtonState::Release);
        assert!(rec.events.is_empty());

        let gesture = button.poll(false, 450, &mut rec);
        assert_eq!(gesture, Some(Gesture::Single));
        assert_eq!(button.state(), ButtonState::Idle);
        assert_eq!(rec.events.as_slice(), &[Gesture::Single]);
    }

    #[test]
    fn test_single_waits_out_window() {
        let mut button = wired(ButtonTiming::default());
        let mut rec = Recorder::default();

        button.poll(true, 0, &mut rec);
        button.poll(false, 100, &mut rec);

        // Still inside the grace period measured from the release
        for t in (110..400).step_by(10) {
            assert_eq!(button.poll(false, t, &mut rec), None);
        }
        assert_eq!(button.poll(false, 400, &mut rec), Some(Gesture::Single));
        assert_eq!(rec.count(Gesture::Single), 1);

        // Nothing more while idle
        button.poll(false, 2000, &mut rec);
        assert_eq!(rec.events.len(), 1);
    }

    #[test]
    fn test_double_press_scenario() {
        let mut button = wired(ButtonTiming::default());
        let mut rec = Recorder::default();

        button.poll(true, 0, &mut rec);
        button.poll(false, 100, &mut rec);
        assert_eq!(button.state(), ButtonState::Release);

        button.poll(true, 200, &mut rec);
        assert_eq!(button.state(), ButtonState::Single);
        assert!(button.is_double_pending());

        button.poll(false, 250, &mut rec);
        assert_eq!(button.state(), ButtonState::Release);

        // Double fires on the first released sample in Release
        button.poll(false, 600, &mut rec);
        assert_eq!(rec.count(Gesture::Double), 1);
        assert_eq!(rec.count(Gesture::Single), 0);
        assert_eq!(button.state(), ButtonState::Idle);
        assert!(!button.is_double_pending());
    }

    #[test]
    fn test_long_press_fires_on_release() {
        let mut button = wired(ButtonTiming::default());
        let mut rec = Recorder::default();

        hold(&mut button, &mut rec, 0, 800, 10);
        assert!(rec.events.is_empty());
        assert_eq!(button.state(), ButtonState::Single);

        button.poll(false, 800, &mut rec);
        assert_eq!(rec.events.as_slice(), &[Gesture::Long]);
        assert_eq!(button.state(), ButtonState::Idle);
    }

    #[test]
    fn test_long_press_at_exact_window() {
        let mut button = wired(ButtonTiming::default());
        let mut rec = Recorder::default();

        button.poll(true, 0, &mut rec);
        assert_eq!(button.poll(false, 300, &mut rec), Some(Gesture::Long));
    }

    #[test]
    fn test_long_after_second_tap_clears_double() {
        let mut button = wired(ButtonTiming::default());
        let mut rec = Recorder::default();

        button.poll(true, 0, &mut rec);
        button.poll(false, 50, &mut rec);
        button.poll(true, 100, &mut rec);
        assert!(button.is_double_pending());

        button.poll(false, 700, &mut rec);
        assert_eq!(rec.events.as_slice(), &[Gesture::Long]);
        assert!(!button.is_double_pending());
    }

    #[test]
    fn test_sustain_scaled_elapsed() {
        let mut button = wired(ButtonTiming::default());
        let mut rec = Recorder::default();

        hold(&mut button, &mut rec, 0, 1001, 1);
        assert!(rec.events.is_empty());

        // Enters sustain strictly after the delay
        button.poll(true, 1001, &mut rec);
        assert_eq!(button.state(), ButtonState::Sustain);
        assert_eq!(button.sustain_count(), 1);
        assert_eq!(
            rec.events.last(),
            Some(&Gesture::Sustain(SustainEvent { is_final: false, elapsed: 50 }))
        );

        // Repeats strictly after each interval
        hold(&mut button, &mut rec, 1002, 1052, 1);
        assert_eq!(rec.sustains().count(), 1);
        button.poll(true, 1052, &mut rec);
        assert_eq!(rec.sustains().count(), 2);
        assert_eq!(button.sustain_count(), 2);

        button.poll(false, 1060, &mut rec);
        let last = rec.sustains().last().unwrap();
        assert_eq!(last, SustainEvent { is_final: true, elapsed: 150 });
        assert_eq!(button.state(), ButtonState::Idle);
        assert_eq!(button.sustain_count(), 0);
        assert_eq!(rec.count(Gesture::Long), 0);
    }

    #[test]
    fn test_sustain_raw_count() {
        let mut button = wired(ButtonTiming::LEGACY);
        let mut rec = Recorder::default();

        hold(&mut button, &mut rec, 0, 1500, 5);
        button.poll(false, 1500, &mut rec);

        let events: heapless::Vec<SustainEvent, 32> = rec.sustains().collect();
        assert_eq!(events[0], SustainEvent { is_final: false, elapsed: 0 });
        for pair in events.windows(2) {
            assert_eq!(pair[1].elapsed, pair[0].elapsed + 1);
        }
        let last = events.last().unwrap();
        assert!(last.is_final);
        assert_eq!(events.iter().filter(|e| e.is_final).count(), 1);
    }

    #[test]
    fn test_sustain_final_without_repeat() {
        let mut button = wired(ButtonTiming::default());
        let mut rec = Recorder::default();

        button.poll(true, 0, &mut rec);
        button.poll(true, 1001, &mut rec);
        button.poll(false, 1010, &mut rec);

        assert_eq!(
            rec.events.as_slice(),
            &[
                Gesture::Sustain(SustainEvent { is_final: false, elapsed: 50 }),
                Gesture::Sustain(SustainEvent { is_final: true, elapsed: 100 }),
            ]
        );
    }

    #[test]
    fn test_unset_handlers_are_skipped() {
        let mut button: Button<Recorder> = Button::default();
        let mut rec = Recorder::default();

        button.poll(true, 0, &mut rec);
        button.poll(false, 10, &mut rec);
        assert_eq!(button.poll(false, 400, &mut rec), Some(Gesture::Single));
        assert!(rec.events.is_empty());
    }

    #[test]
    fn test_rebinding_mid_gesture() {
        let mut button: Button<Recorder> = Button::default();
        let mut rec = Recorder::default();

        button.poll(true, 0, &mut rec);
        button.set_on_long(long);
        button.poll(false, 500, &mut rec);
        assert_eq!(rec.events.as_slice(), &[Gesture::Long]);
    }

    #[test]
    fn test_timestamp_wraparound() {
        let mut button = wired(ButtonTiming::default());
        let mut rec = Recorder::default();
        let start = u32::MAX - 100;

        button.poll(true, start, &mut rec);
        button.poll(false, start.wrapping_add(150), &mut rec);
        button.poll(false, start.wrapping_add(450), &mut rec);
        assert_eq!(rec.events.as_slice(), &[Gesture::Single]);
    }

    fn timing_strategy() -> impl Strategy<Value = ButtonTiming> {
        prop_oneof![Just(ButtonTiming::default()), Just(ButtonTiming::LEGACY)]
    }

    fn total_time(samples: &[(bool, u32)]) -> u32 {
        samples.iter().map(|&(_, dt)| dt).sum()
    }

    proptest! {
        #[test]
        fn prop_state_follows_level(
            timing in timing_strategy(),
            samples in proptest::collection::vec((any::<bool>(), 0u32..400), 1..200),
        ) {
            let mut button = wired(timing);
            let mut rec = Recorder::default();
            let mut now = 0u32;

            for (pressed, dt) in samples {
                now += dt;
                button.poll(pressed, now, &mut rec);
                if pressed {
                    prop_assert!(matches!(button.state(), ButtonState::Single | ButtonState::Sustain));
                } else {
                    prop_assert!(matches!(button.state(), ButtonState::Idle | ButtonState::Release));
                }
                if button.state() == ButtonState::Idle {
                    prop_assert!(!button.is_double_pending());
                }
            }
        }

        #[test]
        fn prop_one_terminal_per_cycle(
            timing in timing_strategy(),
            samples in proptest::collection::vec((any::<bool>(), 0u32..400), 1..200),
        ) {
            let mut button = wired(timing);
            let mut rec = Recorder::default();
            let mut cycles = 0usize;
            let mut terminals = 0usize;
            let mut last_elapsed: Option<u32> = None;

            // Released long enough afterwards for any pending cycle to settle
            let settle = total_time(&samples) + 1;
            let tail = [(false, settle), (false, settle + timing.debounce_ms)];
            let timeline = samples
                .iter()
                .scan(0u32, |t, &(pressed, dt)| {
                    *t += dt;
                    Some((pressed, *t))
                })
                .chain(tail);

            for (pressed, now) in timeline {
                // A press from idle opens a cycle; a press in the double
                // window continues the current one
                if pressed && button.state() == ButtonState::Idle {
                    cycles += 1;
                }

                if let Some(gesture) = button.poll(pressed, now, &mut rec) {
                    if let Gesture::Sustain(event) = gesture {
                        if let Some(prev) = last_elapsed {
                            prop_assert!(event.elapsed >= prev);
                        }
                        last_elapsed = Some(event.elapsed);
                    }
                    if gesture.is_terminal() {
                        terminals += 1;
                        last_elapsed = None;
                        prop_assert_eq!(button.state(), ButtonState::Idle);
                    }
                }
            }

            prop_assert_eq!(button.state(), ButtonState::Idle);
            prop_assert_eq!(terminals, cycles);
        }

        #[test]
        fn prop_short_tap_is_single(press_ms in 1u32..300, extra in 0u32..500) {
            let mut button = wired(ButtonTiming::default());
            let mut rec = Recorder::default();

            button.poll(true, 0, &mut rec);
            button.poll(false, press_ms, &mut rec);
            button.poll(false, press_ms + 300 + extra, &mut rec);

            prop_assert_eq!(rec.events.as_slice(), &[Gesture::Single]);
        }
    }

    #[test]
    fn test_scaled_policy_is_default() {
        assert_eq!(
            Button::<Recorder>::default().timing().sustain_policy,
            SustainPolicy::ScaledElapsed
        );
    }
}
