//! Nixie Clock Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the clock drivers are written
//! against, so the same drivers run on any chip with an implementation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  nixie-drivers (display, RTC, storage)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nixie-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ nixie-hal-    │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`adc::AnalogInput`] - Analog button sampling
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`flash::FlashStorage`] - Persistent storage region

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod flash;
pub mod gpio;
pub mod i2c;

pub use adc::{AdcError, AnalogInput};
pub use flash::{FlashError, FlashStorage};
pub use gpio::{InputPin, OutputPin};
pub use i2c::{I2cBus, I2cConfig};
