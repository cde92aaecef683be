//! Nixie tube display trait

/// Trait for the tube driver
///
/// Digits are given most significant first. Implementations map them onto
/// whatever wiring the board uses.
pub trait NixieDisplay {
    /// Show `digits` (each 0-9)
    ///
    /// Extra digits beyond the tube count are ignored.
    fn write_digits(&mut self, digits: &[u8]);

    /// Turn every tube off
    fn blank(&mut self);

    /// Drive the separator dots
    fn set_dots(&mut self, on: bool);
}
