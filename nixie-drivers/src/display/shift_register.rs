//! Nixie display behind a 74HC595 chain
//!
//! Each tube has a BCD-to-decimal driver (74141 or K155ID1) fed by four
//! shift register outputs. Two registers carry four tubes, a third adds
//! the seconds. Codes above 9 select no cathode, so driving every output
//! high blanks the display.
//!
//! # Shift order
//!
//! Registers are shifted out last to first, most significant bit first,
//! then latched on the rising edge of the storage clock.

use nixie_core::config::DigitCount;
use nixie_core::traits::NixieDisplay;
use nixie_hal::OutputPin;

/// Registers for six tubes
pub const MAX_REGISTERS: usize = 3;

/// Register outputs carrying BCD bits 0-3 of each tube position
///
/// Output `n` is bit `n % 8` of register `n / 8`.
pub const SR_PINS: [[u8; 4]; 6] = [
    [7, 5, 4, 6],
    [3, 1, 0, 2],
    [7 + 8, 5 + 8, 4 + 8, 6 + 8],
    [3 + 8, 1 + 8, 0 + 8, 2 + 8],
    [7 + 16, 5 + 16, 4 + 16, 6 + 16],
    [3 + 16, 1 + 16, 0 + 16, 2 + 16],
];

/// Bit-banged 74HC595 tube driver with a separate dots output
pub struct ShiftRegisterDisplay<DS, SH, ST, DOT> {
    /// Serial data (DS)
    data: DS,
    /// Shift clock (SHCP)
    clock: SH,
    /// Storage clock (STCP)
    latch: ST,
    dots: DOT,
    registers: [u8; MAX_REGISTERS],
    digit_count: DigitCount,
    /// Tubes wired right to left
    invert: bool,
}

impl<DS, SH, ST, DOT> ShiftRegisterDisplay<DS, SH, ST, DOT>
where
    DS: OutputPin,
    SH: OutputPin,
    ST: OutputPin,
    DOT: OutputPin,
{
    pub fn new(
        mut data: DS,
        mut clock: SH,
        mut latch: ST,
        mut dots: DOT,
        digit_count: DigitCount,
        invert: bool,
    ) -> Self {
        data.set_low();
        clock.set_low();
        latch.set_low();
        dots.set_low();
        Self {
            data,
            clock,
            latch,
            dots,
            registers: [0; MAX_REGISTERS],
            digit_count,
            invert,
        }
    }

    /// Registers in the chain
    pub fn register_count(&self) -> usize {
        self.digit_count.count() / 2
    }

    /// Output state as last latched
    pub fn registers(&self) -> &[u8] {
        &self.registers[..self.register_count()]
    }

    /// Stage the BCD code of the tube at `position` without latching
    fn set_digit(&mut self, position: usize, value: u8) {
        let count = self.digit_count.count();
        if position >= count {
            return;
        }
        let position = if self.invert {
            count - 1 - position
        } else {
            position
        };

        for (bit, &output) in SR_PINS[position].iter().enumerate() {
            let register = &mut self.registers[output as usize / 8];
            let mask = 1 << (output % 8);
            if value & (1 << bit) != 0 {
                *register |= mask;
            } else {
                *register &= !mask;
            }
        }
    }

    /// Shift the staged registers out and latch them
    fn update(&mut self) {
        self.latch.set_low();
        for index in (0..self.register_count()).rev() {
            let byte = self.registers[index];
            for bit in (0..8).rev() {
                self.data.set_state(byte & (1 << bit) != 0);
                self.clock.set_high();
                self.clock.set_low();
            }
        }
        self.latch.set_high();
        self.latch.set_low();
    }
}

impl<DS, SH, ST, DOT> NixieDisplay for ShiftRegisterDisplay<DS, SH, ST, DOT>
where
    DS: OutputPin,
    SH: OutputPin,
    ST: OutputPin,
    DOT: OutputPin,
{
    fn write_digits(&mut self, digits: &[u8]) {
        for (position, &value) in digits.iter().enumerate() {
            self.set_digit(position, value);
        }
        self.update();
    }

    fn blank(&mut self) {
        self.registers = [0xFF; MAX_REGISTERS];
        self.update();
    }

    fn set_dots(&mut self, on: bool) {
        self.dots.set_state(on);
    }
}
