//! Backlight LED modes and animation

use rgb::RGB8;

use serde::{Deserialize, Serialize};

/// Largest supported strip
pub const MAX_LEDS: usize = 16;

/// Brightness change per sustain repeat
pub const BRIGHTNESS_STEP: u8 = 16;

/// Hue spread of [`LedMode::Rainbow`] across the strip
const RAINBOW_SPREAD: u8 = 64;

/// Hue spread of [`LedMode::Rainbow2`], all LEDs nearly the same color
const RAINBOW2_SPREAD: u8 = 1;

/// Backlight mode, cycled by a single press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Serialize, Deserialize)]
#[repr(u8)]
pub enum LedMode {
    /// Rolling rainbow spread across the strip
    #[default]
    Rainbow = 0,
    /// Rolling rainbow, whole strip one color
    Rainbow2,
    Blue,
    Cyan,
    Green,
    OrangeRed,
    Red,
    Purple,
    White,
}

impl LedMode {
    /// Number of modes
    pub const COUNT: u8 = 9;

    /// Mode from a stored byte, wrapping out-of-range values
    pub fn from_u8(value: u8) -> Self {
        match value % Self::COUNT {
            0 => LedMode::Rainbow,
            1 => LedMode::Rainbow2,
            2 => LedMode::Blue,
            3 => LedMode::Cyan,
            4 => LedMode::Green,
            5 => LedMode::OrangeRed,
            6 => LedMode::Red,
            7 => LedMode::Purple,
            _ => LedMode::White,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Following mode, wrapping to the first
    pub fn next(self) -> Self {
        Self::from_u8(self.as_u8() + 1)
    }

    /// Fixed color of the solid modes
    pub fn solid_color(self) -> Option<RGB8> {
        match self {
            LedMode::Rainbow | LedMode::Rainbow2 => None,
            LedMode::Blue => Some(RGB8::new(0x00, 0x00, 0xFF)),
            LedMode::Cyan => Some(RGB8::new(0x00, 0xFF, 0xFF)),
            LedMode::Green => Some(RGB8::new(0x00, 0x80, 0x00)),
            LedMode::OrangeRed => Some(RGB8::new(0xFF, 0x45, 0x00)),
            LedMode::Red => Some(RGB8::new(0xFF, 0x00, 0x00)),
            LedMode::Purple => Some(RGB8::new(0x80, 0x00, 0x80)),
            LedMode::White => Some(RGB8::new(0xFF, 0xFF, 0xFF)),
        }
    }
}

/// Color on a red → green → blue → red wheel
pub fn hue_wheel(hue: u8) -> RGB8 {
    let position = hue as u16 * 3;
    let offset = (position % 256) as u8;
    match position / 256 {
        0 => RGB8::new(255 - offset, offset, 0),
        1 => RGB8::new(0, 255 - offset, offset),
        _ => RGB8::new(offset, 0, 255 - offset),
    }
}

/// Scale a color by `brightness`, 255 leaving it unchanged
pub fn scale_brightness(color: RGB8, brightness: u8) -> RGB8 {
    let scale = |c: u8| ((c as u16 * (brightness as u16 + 1)) >> 8) as u8;
    RGB8::new(scale(color.r), scale(color.g), scale(color.b))
}

/// Animation state of the backlight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedAnimator {
    mode: LedMode,
    /// Hue offset advanced every frame in the rainbow modes
    hue_offset: u8,
    brightness: u8,
    /// Direction of the next brightness change
    brightening: bool,
}

impl LedAnimator {
    pub const fn new(mode: LedMode, brightness: u8) -> Self {
        Self {
            mode,
            hue_offset: 0,
            brightness,
            brightening: false,
        }
    }

    pub fn mode(&self) -> LedMode {
        self.mode
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn set_mode(&mut self, mode: LedMode) {
        self.mode = mode;
        self.hue_offset = 0;
    }

    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    /// Switch to the next mode, restarting the rainbow
    pub fn next_mode(&mut self) -> LedMode {
        self.set_mode(self.mode.next());
        self.mode
    }

    /// Step brightness in the current direction
    ///
    /// The direction flips once the adjustment ends, so the next hold goes
    /// the other way.
    pub fn change_brightness(&mut self, is_final: bool) -> u8 {
        self.brightness = if self.brightening {
            self.brightness.saturating_add(BRIGHTNESS_STEP)
        } else {
            self.brightness.saturating_sub(BRIGHTNESS_STEP)
        };
        if is_final {
            self.brightening = !self.brightening;
        }
        self.brightness
    }

    /// Render the next frame into `frame`
    pub fn step(&mut self, frame: &mut [RGB8]) {
        match self.mode {
            LedMode::Rainbow => self.rainbow(frame, RAINBOW_SPREAD),
            LedMode::Rainbow2 => self.rainbow(frame, RAINBOW2_SPREAD),
            mode => {
                let color = mode.solid_color().unwrap_or_default();
                frame.fill(color);
            }
        }
    }

    fn rainbow(&mut self, frame: &mut [RGB8], spread: u8) {
        self.hue_offset = self.hue_offset.wrapping_add(1);
        let last = frame.len().saturating_sub(1).max(1);
        for (i, led) in frame.iter_mut().enumerate() {
            let hue = (spread as usize * i / last) as u8;
            *led = hue_wheel(hue.wrapping_add(self.hue_offset));
        }
    }
}

impl Default for LedAnimator {
    fn default() -> Self {
        Self::new(LedMode::default(), 255)
    }
}
