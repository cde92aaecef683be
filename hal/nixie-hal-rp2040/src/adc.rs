//! ADC channel bank
//!
//! Analog buttons share the single RP2040 converter. Each read is a
//! blocking one-shot conversion of about 2 µs.

use embassy_rp::adc::{Adc, AdcPin, Blocking, Channel, Config};
use embassy_rp::gpio::Pull;
use embassy_rp::peripherals::ADC;
use embassy_rp::Peri;
use nixie_hal::{AdcError, AnalogInput};

/// `N` analog channels sampled through one converter
pub struct RpAdc<'d, const N: usize> {
    adc: Adc<'d, Blocking>,
    channels: [Channel<'d>; N],
}

impl<'d, const N: usize> RpAdc<'d, N> {
    /// Create the bank from already-configured channels
    pub fn new(adc: Peri<'d, ADC>, channels: [Channel<'d>; N]) -> Self {
        Self {
            adc: Adc::new_blocking(adc, Config::default()),
            channels,
        }
    }

    /// Configure one of GPIO26-29 as a floating ADC channel
    ///
    /// Analog buttons use an external resistor ladder, so the internal
    /// pulls stay off.
    pub fn channel(pin: Peri<'d, impl AdcPin>) -> Channel<'d> {
        Channel::new_pin(pin, Pull::None)
    }
}

impl<const N: usize> AnalogInput for RpAdc<'_, N> {
    fn channel_count(&self) -> usize {
        N
    }

    fn read(&mut self, channel: usize) -> Result<u16, AdcError> {
        let channel = self
            .channels
            .get_mut(channel)
            .ok_or(AdcError::InvalidChannel)?;
        self.adc
            .blocking_read(channel)
            .map_err(|_| AdcError::Conversion)
    }
}
