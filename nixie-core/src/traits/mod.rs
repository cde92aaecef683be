//! Collaborator traits
//!
//! These traits define the interface between the clock application and
//! the hardware it drives. All calls are blocking and return promptly; the
//! application invokes them only from inside a scheduler pass.

pub mod display;
pub mod input;
pub mod led;
pub mod rtc;
pub mod storage;

pub use display::NixieDisplay;
pub use input::InputSource;
pub use led::LedStrip;
pub use rtc::{RealTimeClock, RtcError};
pub use storage::{SettingsStore, StorageError};

use embedded_hal::delay::DelayNs;

/// Everything the clock application needs from a board
///
/// Implemented automatically for any type providing the individual
/// collaborators.
pub trait Board: NixieDisplay + RealTimeClock + SettingsStore + LedStrip + DelayNs {}

impl<T> Board for T where T: NixieDisplay + RealTimeClock + SettingsStore + LedStrip + DelayNs {}
