//! User settings persisted across power cycles
//!
//! Settings are stored as a postcard-encoded record prefixed by a
//! signature, so blank or foreign flash contents load as "no settings".

use serde::{Deserialize, Serialize};

use crate::leds::LedMode;
use crate::traits::StorageError;

/// Marks a valid settings record
pub const SETTINGS_SIGNATURE: u32 = 0xBEEF_DEED;

/// Upper bound of an encoded record
pub const MAX_SETTINGS_SIZE: usize = 32;

/// Settings changed from the buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// Ignore the auto-off delay entirely
    pub always_on: bool,
    /// Stored as a byte so unknown values wrap instead of failing to load
    pub led_mode: u8,
    pub brightness: u8,
}

impl Settings {
    pub fn led_mode(&self) -> LedMode {
        LedMode::from_u8(self.led_mode)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            always_on: true,
            led_mode: LedMode::Rainbow.as_u8(),
            brightness: 255,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct SettingsRecord {
    signature: u32,
    settings: Settings,
}

/// Encode settings into `buf`, returning the used prefix
pub fn encode<'a>(settings: &Settings, buf: &'a mut [u8]) -> Result<&'a mut [u8], StorageError> {
    let record = SettingsRecord {
        signature: SETTINGS_SIGNATURE,
        settings: *settings,
    };
    postcard::to_slice(&record, buf).map_err(|_| StorageError::Encode)
}

/// Decode a stored record
///
/// Returns `Ok(None)` when the signature does not match, which is the case
/// for erased flash and records written by other firmware.
pub fn decode(bytes: &[u8]) -> Result<Option<Settings>, StorageError> {
    let Ok((signature, rest)) = postcard::take_from_bytes::<u32>(bytes) else {
        return Ok(None);
    };
    if signature != SETTINGS_SIGNATURE {
        return Ok(None);
    }
    let settings = postcard::from_bytes::<Settings>(rest).map_err(|_| StorageError::Decode)?;
    Ok(Some(settings))
}

/// Decode a record that is expected to be present, such as a read-back
/// after a write
pub fn decode_record(bytes: &[u8]) -> Result<Settings, StorageError> {
    decode(bytes)?.ok_or(StorageError::BadSignature)
}
