//! I2C master abstraction
//!
//! The clock has one device on the bus, the DS3231 RTC. Its registers are
//! reached through an internal pointer: a write sets the pointer and any
//! following bytes are stored from there on, a read continues from it.

/// Blocking I2C master
pub trait I2cBus {
    type Error;

    /// Write `data` to the 7-bit `address`
    ///
    /// For register devices the first byte is the register pointer.
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read from the device's current register pointer
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Set the register pointer, then read with a repeated start
    ///
    /// Used to fetch the seconds, minutes and hours registers in one
    /// transaction so they cannot roll over between reads.
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

/// Bus clock settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2cConfig {
    /// SCL frequency in Hz
    pub frequency: u32,
}

impl I2cConfig {
    /// 100 kHz, what the RTC breakout boards' pull-ups are sized for
    pub const STANDARD: Self = Self { frequency: 100_000 };
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}
