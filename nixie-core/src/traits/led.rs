//! Backlight LED strip trait

use rgb::RGB8;

/// Trait for the addressable backlight
pub trait LedStrip {
    /// Push a frame, scaled by `brightness` (255 = full)
    fn write(&mut self, frame: &[RGB8], brightness: u8);

    /// Turn every LED off
    fn blank(&mut self);
}
