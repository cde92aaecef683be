//! Flash storage abstractions
//!
//! A [`FlashStorage`] is a small dedicated region of non-volatile memory,
//! addressed from 0. The clock keeps a single settings record at the start
//! of the region.

/// Errors from flash storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Flash operation failed
    Flash,
    /// Access extends past the end of the region
    OutOfBounds,
    /// Write offset or length is not a multiple of the write size
    Unaligned,
}

/// Blocking flash region
///
/// Writes only clear bits, so a region must be erased before it is
/// rewritten. Erased bytes read as `0xFF`.
pub trait FlashStorage {
    /// Size of the region in bytes
    fn capacity(&self) -> usize;

    /// Write granularity; offsets and lengths of writes are multiples of it
    fn write_size(&self) -> usize;

    /// Read `buf.len()` bytes starting at `offset`
    fn read(&mut self, offset: u32, buf: &mut [u8]) -> Result<(), FlashError>;

    /// Erase the whole region
    fn erase(&mut self) -> Result<(), FlashError>;

    /// Program `data` at `offset`
    fn write(&mut self, offset: u32, data: &[u8]) -> Result<(), FlashError>;

    /// Check an access against the region bounds
    fn check_bounds(&self, offset: u32, len: usize) -> Result<(), FlashError> {
        let end = (offset as usize)
            .checked_add(len)
            .ok_or(FlashError::OutOfBounds)?;
        if end > self.capacity() {
            return Err(FlashError::OutOfBounds);
        }
        Ok(())
    }

    /// Check a write against bounds and write granularity
    fn check_write(&self, offset: u32, len: usize) -> Result<(), FlashError> {
        self.check_bounds(offset, len)?;
        let size = self.write_size();
        if size == 0 || offset as usize % size != 0 || len % size != 0 {
            return Err(FlashError::Unaligned);
        }
        Ok(())
    }
}
