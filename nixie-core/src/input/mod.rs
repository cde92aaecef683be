//! Button gesture recognition
//!
//! One [`Button`] per physical input turns a sampled "is pressed" level
//! into single, long, double and sustained-repeat gestures.

pub mod button;
pub mod gesture;

pub use button::{Button, ButtonState, PressHandler, SustainHandler};
pub use gesture::{
    is_analog_pressed, ButtonTiming, Gesture, InputMode, SustainEvent, SustainPolicy,
    DEFAULT_ANALOG_THRESHOLD,
};
