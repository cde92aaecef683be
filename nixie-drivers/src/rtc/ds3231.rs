//! DS3231 real-time clock (I2C)
//!
//! Only the timekeeping registers are used; the date, alarms and the
//! temperature sensor are left alone.
//!
//! # Register Layout
//!
//! | Addr | Content                                         |
//! |------|-------------------------------------------------|
//! | 0x00 | Seconds, BCD                                    |
//! | 0x01 | Minutes, BCD                                    |
//! | 0x02 | Hours: bit 6 = 12h mode, bit 5 = PM or 20 hours |

use nixie_core::clock::TimeOfDay;
use nixie_core::traits::{RealTimeClock, RtcError};
use nixie_hal::I2cBus;

/// Fixed 7-bit bus address
pub const DS3231_ADDRESS: u8 = 0x68;

/// DS3231 register addresses
pub mod reg {
    pub const SECONDS: u8 = 0x00;
    pub const MINUTES: u8 = 0x01;
    pub const HOURS: u8 = 0x02;
}

/// 12-hour mode select in the hours register
const HOURS_12H: u8 = 0x40;
/// PM flag in 12-hour mode
const HOURS_PM: u8 = 0x20;

/// DS3231 driver
pub struct Ds3231<I2C> {
    i2c: I2C,
}

impl<I2C: I2cBus> Ds3231<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Switch the chip to 24-hour mode, preserving the current hour
    pub fn set_24h_mode(&mut self) -> Result<(), RtcError> {
        let mut hours = [0u8; 1];
        self.i2c
            .write_read(DS3231_ADDRESS, &[reg::HOURS], &mut hours)
            .map_err(|_| RtcError::Bus)?;
        if hours[0] & HOURS_12H == 0 {
            return Ok(());
        }

        let hour = decode_hours(hours[0])?;

        #[cfg(feature = "defmt")]
        defmt::info!("ds3231: switching to 24h mode");

        self.i2c
            .write(DS3231_ADDRESS, &[reg::HOURS, bin_to_bcd(hour)])
            .map_err(|_| RtcError::Bus)
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2cBus> RealTimeClock for Ds3231<I2C> {
    fn read_time(&mut self) -> Result<TimeOfDay, RtcError> {
        let mut raw = [0u8; 3];
        self.i2c
            .write_read(DS3231_ADDRESS, &[reg::SECONDS], &mut raw)
            .map_err(|_| RtcError::Bus)?;

        let second = bcd_to_bin(raw[0] & 0x7F)?;
        let minute = bcd_to_bin(raw[1] & 0x7F)?;
        let hour = decode_hours(raw[2])?;
        TimeOfDay::new(hour, minute, second).ok_or(RtcError::InvalidData)
    }

    fn write_time(&mut self, time: TimeOfDay) -> Result<(), RtcError> {
        // Hours written without the 12h bit keep the chip in 24-hour mode
        let frame = [
            reg::SECONDS,
            bin_to_bcd(time.second),
            bin_to_bcd(time.minute),
            bin_to_bcd(time.hour),
        ];
        self.i2c
            .write(DS3231_ADDRESS, &frame)
            .map_err(|_| RtcError::Bus)
    }
}

/// Decode the hours register in either mode to 0-23
fn decode_hours(raw: u8) -> Result<u8, RtcError> {
    if raw & HOURS_12H == 0 {
        return bcd_to_bin(raw & 0x3F);
    }
    let hour12 = bcd_to_bin(raw & 0x1F)?;
    if !(1..=12).contains(&hour12) {
        return Err(RtcError::InvalidData);
    }
    let pm = raw & HOURS_PM != 0;
    Ok(hour12 % 12 + if pm { 12 } else { 0 })
}

fn bcd_to_bin(value: u8) -> Result<u8, RtcError> {
    let (tens, units) = (value >> 4, value & 0x0F);
    if tens > 9 || units > 9 {
        return Err(RtcError::InvalidData);
    }
    Ok(tens * 10 + units)
}

fn bin_to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}
