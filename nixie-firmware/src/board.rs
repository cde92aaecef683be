//! Clock board wiring
//!
//! Pin assignments follow the original single-board layout:
//!
//! | Function          | GPIO       |
//! |-------------------|------------|
//! | Tube dots         | 0          |
//! | 74HC595 latch     | 1          |
//! | 74HC595 clock     | 2          |
//! | 74HC595 data      | 3          |
//! | DS3231 SDA / SCL  | 4 / 5      |
//! | WS2812 data       | 6          |
//! | Buttons (digital) | 10 9 8 7   |
//! | Buttons (analog)  | 26 27 28 29|

use embassy_rp::peripherals::I2C0;
use embassy_time::Delay;
use embedded_hal::delay::DelayNs;
use nixie_core::app::BUTTON_COUNT;
use nixie_core::clock::TimeOfDay;
use nixie_core::leds::{scale_brightness, MAX_LEDS};
use nixie_core::settings::Settings;
use nixie_core::traits::{LedStrip, NixieDisplay, RealTimeClock, RtcError, SettingsStore, StorageError};
use nixie_drivers::display::ShiftRegisterDisplay;
use nixie_drivers::input::ButtonInputs;
use nixie_drivers::rtc::Ds3231;
use nixie_drivers::storage::FlashSettingsStore;
use nixie_hal_rp2040::{RpAdc, RpFlash, RpI2c, RpInput, RpOutput};
use rgb::RGB8;

pub type Display =
    ShiftRegisterDisplay<RpOutput<'static>, RpOutput<'static>, RpOutput<'static>, RpOutput<'static>>;
pub type Rtc = Ds3231<RpI2c<'static, I2C0>>;
pub type Store = FlashSettingsStore<RpFlash<'static>>;
pub type Inputs = ButtonInputs<RpInput<'static>, RpAdc<'static, BUTTON_COUNT>, BUTTON_COUNT>;

/// LED frame staged for the PIO driver
///
/// The strip is written asynchronously by the main loop, so the
/// controller only fills this buffer.
pub struct LedFrame {
    colors: [RGB8; MAX_LEDS],
    dirty: bool,
}

impl LedFrame {
    pub const fn new() -> Self {
        Self {
            colors: [RGB8 { r: 0, g: 0, b: 0 }; MAX_LEDS],
            dirty: false,
        }
    }

    /// Frame to push to the strip, if it changed since the last call
    pub fn take(&mut self) -> Option<[RGB8; MAX_LEDS]> {
        core::mem::take(&mut self.dirty).then_some(self.colors)
    }
}

impl LedStrip for LedFrame {
    fn write(&mut self, frame: &[RGB8], brightness: u8) {
        self.colors.fill(RGB8::default());
        for (out, color) in self.colors.iter_mut().zip(frame) {
            *out = scale_brightness(*color, brightness);
        }
        self.dirty = true;
    }

    fn blank(&mut self) {
        self.colors.fill(RGB8::default());
        self.dirty = true;
    }
}

/// Peripherals the clock controller drives
pub struct ClockBoard {
    pub display: Display,
    pub rtc: Rtc,
    pub store: Store,
    pub leds: LedFrame,
    pub delay: Delay,
}

impl NixieDisplay for ClockBoard {
    fn write_digits(&mut self, digits: &[u8]) {
        self.display.write_digits(digits);
    }

    fn blank(&mut self) {
        NixieDisplay::blank(&mut self.display);
    }

    fn set_dots(&mut self, on: bool) {
        self.display.set_dots(on);
    }
}

impl RealTimeClock for ClockBoard {
    fn read_time(&mut self) -> Result<TimeOfDay, RtcError> {
        self.rtc.read_time()
    }

    fn write_time(&mut self, time: TimeOfDay) -> Result<(), RtcError> {
        self.rtc.write_time(time)
    }
}

impl SettingsStore for ClockBoard {
    fn load(&mut self) -> Result<Option<Settings>, StorageError> {
        self.store.load()
    }

    fn save(&mut self, settings: &Settings) -> Result<(), StorageError> {
        self.store.save(settings)
    }
}

impl LedStrip for ClockBoard {
    fn write(&mut self, frame: &[RGB8], brightness: u8) {
        self.leds.write(frame, brightness);
    }

    fn blank(&mut self) {
        LedStrip::blank(&mut self.leds);
    }
}

impl DelayNs for ClockBoard {
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns);
    }
}
