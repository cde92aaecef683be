//! Button samplers
//!
//! Buttons are either wired active-low to GPIOs with pull-ups, or share
//! an analog input each where a press pulls the level below a threshold.

use nixie_core::input::{is_analog_pressed, InputMode};
use nixie_core::traits::InputSource;
use nixie_hal::{AnalogInput, InputPin};

/// Active-low buttons on digital pins
pub struct DigitalInputs<P, const N: usize> {
    pins: [P; N],
}

impl<P: InputPin, const N: usize> DigitalInputs<P, N> {
    pub fn new(pins: [P; N]) -> Self {
        Self { pins }
    }
}

impl<P: InputPin, const N: usize> InputSource for DigitalInputs<P, N> {
    fn is_pressed(&mut self, index: usize) -> bool {
        self.pins.get(index).map(|pin| pin.is_low()).unwrap_or(false)
    }
}

/// Buttons sampled through ADC channels, one channel per button
pub struct AnalogInputs<A> {
    adc: A,
    threshold: u16,
}

impl<A: AnalogInput> AnalogInputs<A> {
    pub fn new(adc: A, threshold: u16) -> Self {
        Self { adc, threshold }
    }
}

impl<A: AnalogInput> InputSource for AnalogInputs<A> {
    /// A failed conversion reads as released
    fn is_pressed(&mut self, index: usize) -> bool {
        match self.adc.read(index) {
            Ok(value) => is_analog_pressed(value, self.threshold),
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("adc channel {} read failed: {}", index, _e);
                false
            }
        }
    }
}

/// Buttons of either wiring, picked at startup from the configuration
pub enum ButtonInputs<P, A, const N: usize> {
    Digital(DigitalInputs<P, N>),
    Analog(AnalogInputs<A>),
}

impl<P: InputPin, A: AnalogInput, const N: usize> ButtonInputs<P, A, N> {
    pub fn mode(&self) -> InputMode {
        match self {
            ButtonInputs::Digital(_) => InputMode::Digital,
            ButtonInputs::Analog(_) => InputMode::Analog,
        }
    }
}

impl<P: InputPin, A: AnalogInput, const N: usize> InputSource for ButtonInputs<P, A, N> {
    fn is_pressed(&mut self, index: usize) -> bool {
        match self {
            ButtonInputs::Digital(inputs) => inputs.is_pressed(index),
            ButtonInputs::Analog(inputs) => inputs.is_pressed(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nixie_core::input::DEFAULT_ANALOG_THRESHOLD;
    use nixie_hal::AdcError;

    struct MockPin {
        high: bool,
    }

    impl InputPin for MockPin {
        fn is_high(&self) -> bool {
            self.high
        }
    }

    struct MockAdc {
        values: [Result<u16, AdcError>; 4],
    }

    impl AnalogInput for MockAdc {
        fn channel_count(&self) -> usize {
            self.values.len()
        }

        fn read(&mut self, channel: usize) -> Result<u16, AdcError> {
            self.values
                .get(channel)
                .copied()
                .unwrap_or(Err(AdcError::InvalidChannel))
        }
    }

    type Inputs = ButtonInputs<MockPin, MockAdc, 2>;

    #[test]
    fn test_digital_active_low() {
        let mut inputs = DigitalInputs::new([MockPin { high: true }, MockPin { high: false }]);
        assert!(!inputs.is_pressed(0));
        assert!(inputs.is_pressed(1));
        assert!(!inputs.is_pressed(7));
    }

    #[test]
    fn test_analog_threshold() {
        let adc = MockAdc {
            values: [Ok(4095), Ok(200), Ok(201), Err(AdcError::Conversion)],
        };
        let mut inputs = AnalogInputs::new(adc, DEFAULT_ANALOG_THRESHOLD);
        assert!(!inputs.is_pressed(0));
        assert!(inputs.is_pressed(1));
        assert!(!inputs.is_pressed(2));
        assert!(!inputs.is_pressed(3));
        assert!(!inputs.is_pressed(4));
    }

    #[test]
    fn test_either_wiring() {
        let mut digital: Inputs =
            ButtonInputs::Digital(DigitalInputs::new([MockPin { high: false }, MockPin { high: true }]));
        assert_eq!(digital.mode(), InputMode::Digital);
        assert!(digital.is_pressed(0));

        let mut analog: Inputs = ButtonInputs::Analog(AnalogInputs::new(
            MockAdc {
                values: [Ok(0), Ok(4095), Ok(0), Ok(0)],
            },
            DEFAULT_ANALOG_THRESHOLD,
        ));
        assert_eq!(analog.mode(), InputMode::Analog);
        assert!(analog.is_pressed(0));
        assert!(!analog.is_pressed(1));
    }
}
