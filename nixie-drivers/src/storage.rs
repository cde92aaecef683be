//! Settings store on a dedicated flash region
//!
//! The record sits at offset 0. Saving erases the region and programs one
//! padded page, so an interrupted save leaves erased flash, which loads as
//! "no settings" rather than garbage.

use nixie_core::settings::{self, Settings, MAX_SETTINGS_SIZE};
use nixie_core::traits::{SettingsStore, StorageError};
use nixie_hal::{FlashError, FlashStorage};

/// Largest write granularity supported, one RP2040 flash page
pub const RECORD_PAGE_SIZE: usize = 256;

fn flash_error(_e: FlashError) -> StorageError {
    #[cfg(feature = "defmt")]
    defmt::warn!("settings flash access failed: {}", _e);

    StorageError::Flash
}

/// [`SettingsStore`] backed by a [`FlashStorage`] region
pub struct FlashSettingsStore<F> {
    flash: F,
}

impl<F: FlashStorage> FlashSettingsStore<F> {
    pub fn new(flash: F) -> Self {
        Self { flash }
    }

    /// Release the flash region
    pub fn release(self) -> F {
        self.flash
    }

    fn read_record(&mut self) -> Result<[u8; MAX_SETTINGS_SIZE], StorageError> {
        let mut buf = [0u8; MAX_SETTINGS_SIZE];
        self.flash.read(0, &mut buf).map_err(flash_error)?;
        Ok(buf)
    }
}

impl<F: FlashStorage> SettingsStore for FlashSettingsStore<F> {
    fn load(&mut self) -> Result<Option<Settings>, StorageError> {
        let buf = self.read_record()?;
        settings::decode(&buf)
    }

    fn save(&mut self, settings: &Settings) -> Result<(), StorageError> {
        // Flash wears on erase; skip identical records
        if let Ok(Some(stored)) = self.load() {
            if stored == *settings {
                return Ok(());
            }
        }

        let mut page = [0xFFu8; RECORD_PAGE_SIZE];
        let len = settings::encode(settings, &mut page[..MAX_SETTINGS_SIZE])?.len();

        let write_size = self.flash.write_size().max(1);
        let padded = len.div_ceil(write_size) * write_size;
        if padded > RECORD_PAGE_SIZE {
            return Err(StorageError::Flash);
        }

        self.flash.erase().map_err(flash_error)?;
        self.flash.write(0, &page[..padded]).map_err(flash_error)?;

        let written = settings::decode_record(&self.read_record()?)?;
        if written != *settings {
            return Err(StorageError::Flash);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("settings record written, {} bytes", len);

        Ok(())
    }
}
