//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator
//! traits defined in nixie-core, written against the nixie-hal traits:
//!
//! - Nixie display behind a 74HC595 shift register chain
//! - DS3231 real-time clock
//! - Digital and analog button samplers
//! - Flash-backed settings store

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod display;
pub mod input;
pub mod rtc;
pub mod storage;
