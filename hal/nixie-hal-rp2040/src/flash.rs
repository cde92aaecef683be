//! Flash storage driver for RP2040
//!
//! Reserves the last 4 KiB erase sector of the 2 MiB flash for the
//! settings record. Implements the `FlashStorage` trait from `nixie-hal`.

use embassy_rp::flash::{Blocking, Flash, ERASE_SIZE, WRITE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use nixie_hal::{FlashError, FlashStorage};

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB flash on the Pico
pub const SETTINGS_PARTITION_SIZE: usize = ERASE_SIZE;
pub const SETTINGS_PARTITION_START: usize = FLASH_SIZE - SETTINGS_PARTITION_SIZE;

/// Settings sector of the on-board flash
pub struct RpFlash<'d> {
    flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>,
}

impl<'d> RpFlash<'d> {
    pub fn new(flash: Peri<'d, FLASH>) -> Self {
        Self {
            flash: Flash::new_blocking(flash),
        }
    }

    fn absolute(offset: u32) -> u32 {
        SETTINGS_PARTITION_START as u32 + offset
    }
}

impl FlashStorage for RpFlash<'_> {
    fn capacity(&self) -> usize {
        SETTINGS_PARTITION_SIZE
    }

    fn write_size(&self) -> usize {
        WRITE_SIZE
    }

    fn read(&mut self, offset: u32, buf: &mut [u8]) -> Result<(), FlashError> {
        self.check_bounds(offset, buf.len())?;
        self.flash
            .blocking_read(Self::absolute(offset), buf)
            .map_err(|_| FlashError::Flash)
    }

    fn erase(&mut self) -> Result<(), FlashError> {
        let start = SETTINGS_PARTITION_START as u32;
        let end = FLASH_SIZE as u32;
        self.flash
            .blocking_erase(start, end)
            .map_err(|_| FlashError::Flash)
    }

    fn write(&mut self, offset: u32, data: &[u8]) -> Result<(), FlashError> {
        self.check_write(offset, data.len())?;

        #[cfg(feature = "defmt")]
        defmt::debug!("flash write {} bytes at {:#x}", data.len(), Self::absolute(offset));

        self.flash
            .blocking_write(Self::absolute(offset), data)
            .map_err(|_| FlashError::Flash)
    }
}
