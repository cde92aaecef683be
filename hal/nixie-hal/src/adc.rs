//! Analog input abstractions

/// Errors from analog conversions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// Conversion did not complete
    Conversion,
    /// No channel at this index
    InvalidChannel,
}

/// Bank of analog channels sharing one converter
pub trait AnalogInput {
    /// Number of channels in the bank
    fn channel_count(&self) -> usize;

    /// Take one blocking sample of `channel`
    ///
    /// Returns the raw converter value, 0 at ground.
    fn read(&mut self, channel: usize) -> Result<u16, AdcError>;
}
