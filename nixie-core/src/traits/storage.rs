//! Persistent settings storage trait

use crate::settings::Settings;

/// Errors that can occur persisting settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Underlying flash or EEPROM operation failed
    Flash,
    /// Record does not fit the encode buffer
    Encode,
    /// Record carries a valid signature but a corrupt body
    Decode,
    /// Record was written by something else
    BadSignature,
}

/// Trait for the non-volatile settings slot
pub trait SettingsStore {
    /// Load the stored settings
    ///
    /// Returns `Ok(None)` when nothing valid has been stored yet.
    fn load(&mut self) -> Result<Option<Settings>, StorageError>;

    /// Replace the stored settings
    fn save(&mut self, settings: &Settings) -> Result<(), StorageError>;
}
