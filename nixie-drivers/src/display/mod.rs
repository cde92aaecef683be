//! Nixie tube display drivers

pub mod shift_register;

pub use shift_register::{ShiftRegisterDisplay, MAX_REGISTERS, SR_PINS};
