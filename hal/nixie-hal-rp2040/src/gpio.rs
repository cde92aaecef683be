//! GPIO pins
//!
//! Thin wrappers over the `embassy-rp` pin drivers.

use embassy_rp::gpio::{Input, Level, Output, Pin, Pull};
use embassy_rp::Peri;

/// Input pin with configurable pull
pub struct RpInput<'d> {
    pin: Input<'d>,
}

impl<'d> RpInput<'d> {
    pub fn new(pin: Peri<'d, impl Pin>, pull: Pull) -> Self {
        Self {
            pin: Input::new(pin, pull),
        }
    }

    /// Active-low button input against the internal pull-up
    pub fn button(pin: Peri<'d, impl Pin>) -> Self {
        Self::new(pin, Pull::Up)
    }
}

impl nixie_hal::InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

/// Push-pull output pin
pub struct RpOutput<'d> {
    pin: Output<'d>,
}

impl<'d> RpOutput<'d> {
    pub fn new(pin: Peri<'d, impl Pin>, initial_high: bool) -> Self {
        let level = if initial_high { Level::High } else { Level::Low };
        Self {
            pin: Output::new(pin, level),
        }
    }
}

impl nixie_hal::OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
