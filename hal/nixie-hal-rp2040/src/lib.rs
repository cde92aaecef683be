//! RP2040-specific HAL for the nixie clock firmware
//!
//! This crate provides RP2040 implementations of the shared `nixie-hal`
//! traits on top of the blocking `embassy-rp` drivers:
//!
//! - GPIO inputs and outputs
//! - ADC channel bank for analog buttons
//! - I2C master for the RTC
//! - Flash region for the settings record

#![no_std]

pub mod adc;
pub mod flash;
pub mod gpio;
pub mod i2c;

pub use adc::RpAdc;
pub use flash::RpFlash;
pub use gpio::{RpInput, RpOutput};
pub use i2c::RpI2c;

// Re-export shared traits from nixie-hal for convenience
pub use nixie_hal::{AnalogInput, FlashStorage, I2cBus, I2cConfig, InputPin, OutputPin};
