//! Counter and tube-test personalities
//!
//! The same board can run as a counter that another controller feeds
//! over I2C, or as a bench fixture that steps each tube by hand.

/// I2C slave address the counter listens on
pub const COUNTER_I2C_ADDRESS: u8 = 0x2b;

/// Random targets are drawn from `0..COUNTER_RANDOM_RANGE`
pub const COUNTER_RANDOM_RANGE: u32 = 1024;

/// Largest value any tube count can show
const MAX_SHOWN: u32 = 999_999;

/// Displayed value walking one step at a time toward a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CounterState {
    current: u32,
    target: u32,
}

impl CounterState {
    pub const fn new() -> Self {
        Self {
            current: 0,
            target: 0,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// Set the value to count toward, clamped to what six tubes show
    pub fn set_target(&mut self, target: u32) {
        self.target = target.min(MAX_SHOWN);
    }

    /// Move one unit toward the target, returning whether the value changed
    pub fn step(&mut self) -> bool {
        if self.current < self.target {
            self.current += 1;
            true
        } else if self.current > self.target {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Tube digits of the current value, right-aligned with leading zeros
    pub fn digits(&self) -> [u8; 6] {
        let mut digits = [0u8; 6];
        let mut value = self.current;
        for digit in digits.iter_mut().rev() {
            *digit = (value % 10) as u8;
            value /= 10;
        }
        digits
    }
}

/// Decode a target written by the I2C master
///
/// The value is sent big-endian in one to four bytes. Empty and longer
/// writes are rejected.
pub fn decode_target(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() || bytes.len() > 4 {
        return None;
    }
    Some(bytes.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32))
}

/// Digits shown in tube-test mode, each stepped by its own button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TubeTest {
    digits: [u8; 6],
}

impl TubeTest {
    pub const fn new() -> Self {
        Self { digits: [0; 6] }
    }

    /// Advance tube `index`, wrapping 9 -> 0; out-of-range tubes are ignored
    pub fn inc(&mut self, index: usize) {
        if let Some(digit) = self.digits.get_mut(index) {
            *digit = (*digit + 1) % 10;
        }
    }

    pub fn digits(&self) -> [u8; 6] {
        self.digits
    }
}
