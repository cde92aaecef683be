//! Real-time clock trait

use crate::clock::TimeOfDay;

/// Errors that can occur talking to the RTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcError {
    /// Bus transaction failed (NACK, arbitration loss, timeout)
    Bus,
    /// Registers hold a value that is not a valid time
    InvalidData,
}

/// Trait for a battery-backed time source
pub trait RealTimeClock {
    /// Read the current time of day
    fn read_time(&mut self) -> Result<TimeOfDay, RtcError>;

    /// Set the time of day
    fn write_time(&mut self, time: TimeOfDay) -> Result<(), RtcError>;
}
