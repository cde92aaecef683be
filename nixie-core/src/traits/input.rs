//! Button sampling trait

/// Source of per-button pressed levels
///
/// Takes `&mut self` because analog sampling needs exclusive ADC access.
pub trait InputSource {
    /// Sample button `index`, `true` while pressed
    ///
    /// Out-of-range indices read as released.
    fn is_pressed(&mut self, index: usize) -> bool;
}
