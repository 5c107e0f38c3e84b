//! Contiguous storage block: RAM or ROM over an inclusive address range.

use std::fs;
use std::io::Read;
use std::path::Path;

use super::{Access, Device};
use crate::error::{ConfigError, Result};

/// Fixed-size storage covering `start..=end`.
///
/// A read-only block claims its range for reads only, so a write aimed at it
/// falls through to the next device on the bus (or vanishes if there is none).
/// The host can still fill a read-only block with `copy_from` and the loaders.
///
/// # Examples
///
/// ```rust
/// use bus6502::{Access, Device, MemoryBlock};
///
/// let mut rom = MemoryBlock::from_bytes(0xC000, 0xC003, &[0xEA, 0xEA], true).unwrap();
///
/// assert!(rom.claims(0xC001, Access::Read));
/// assert!(!rom.claims(0xC001, Access::Write));
/// assert_eq!(rom.read(0xC001), 0xEA);
/// assert_eq!(rom.read(0xC002), 0x00); // beyond the image, zero filled
///
/// rom.write(0xC000, 0xFF);
/// assert_eq!(rom.read(0xC000), 0xEA);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryBlock {
    start: u16,
    end: u16,
    data: Vec<u8>,
    read_only: bool,
}

impl MemoryBlock {
    /// Creates a block over `start..=end` with every byte set to `fill`.
    ///
    /// Fails with `InvalidRange` if `end < start`.
    pub fn filled(start: u16, end: u16, fill: u8, read_only: bool) -> Result<Self> {
        if end < start {
            return Err(ConfigError::InvalidRange { start, end });
        }

        let len = (end - start) as usize + 1;
        Ok(Self {
            start,
            end,
            data: vec![fill; len],
            read_only,
        })
    }

    /// Zero-filled, writable block.
    ///
    /// ```rust
    /// use bus6502::MemoryBlock;
    ///
    /// let ram = MemoryBlock::ram(0x0000, 0xFFFF).unwrap();
    /// assert_eq!(ram.len(), 0x10000);
    /// ```
    pub fn ram(start: u16, end: u16) -> Result<Self> {
        Self::filled(start, end, 0x00, false)
    }

    /// Creates a block over `start..=end` holding a copy of `bytes` at its
    /// beginning; the remainder is zero filled.
    ///
    /// Fails with `OutOfBounds` if `bytes` is longer than the range.
    pub fn from_bytes(start: u16, end: u16, bytes: &[u8], read_only: bool) -> Result<Self> {
        let mut block = Self::filled(start, end, 0x00, read_only)?;
        block.copy_from(start, bytes)?;
        Ok(block)
    }

    /// First address of the range.
    pub fn start(&self) -> u16 {
        self.start
    }

    /// Last address of the range (inclusive).
    pub fn end(&self) -> u16 {
        self.end
    }

    /// Number of bytes in the block (1 to 65536).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; a block covers at least one address.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True if CPU writes are ignored.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Raw contents, index 0 being `start`.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// True if `addr` lies in `start..=end`.
    pub fn contains(&self, addr: u16) -> bool {
        (self.start..=self.end).contains(&addr)
    }

    /// Copies `bytes` into the block starting at absolute `address`.
    ///
    /// Nothing is written unless the whole slice fits inside the block.
    ///
    /// ```rust
    /// use bus6502::{ConfigError, MemoryBlock};
    ///
    /// let mut ram = MemoryBlock::ram(0x1000, 0x10FF).unwrap();
    /// ram.copy_from(0x10FE, &[1, 2]).unwrap();
    ///
    /// let err = ram.copy_from(0x10FF, &[3, 4]).unwrap_err();
    /// assert!(matches!(err, ConfigError::OutOfBounds { .. }));
    /// assert_eq!(ram.as_slice()[0xFF], 2); // untouched
    /// ```
    pub fn copy_from(&mut self, address: u16, bytes: &[u8]) -> Result<()> {
        let offset = self.checked_span(address, bytes.len())?;
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    /// Reads `reader` to its end and copies the bytes to `address`.
    ///
    /// Returns the number of bytes loaded. The source is read completely
    /// before the bounds check, so a failed load leaves the block untouched.
    pub fn load_from_reader<R: Read>(&mut self, mut reader: R, address: u16) -> Result<usize> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.copy_from(address, &bytes)?;
        Ok(bytes.len())
    }

    /// Loads a flat binary file (no header) to `address`.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P, address: u16) -> Result<usize> {
        let bytes = fs::read(path)?;
        self.copy_from(address, &bytes)?;
        Ok(bytes.len())
    }

    fn checked_span(&self, address: u16, len: usize) -> Result<usize> {
        let out_of_bounds = ConfigError::OutOfBounds {
            address,
            len,
            start: self.start,
            end: self.end,
        };

        if !self.contains(address) && len > 0 {
            return Err(out_of_bounds);
        }

        let offset = address.wrapping_sub(self.start) as usize;
        if offset + len > self.data.len() {
            return Err(out_of_bounds);
        }
        Ok(offset)
    }
}

impl Device for MemoryBlock {
    fn claims(&self, addr: u16, access: Access) -> bool {
        (access == Access::Read || !self.read_only) && self.contains(addr)
    }

    fn read(&mut self, addr: u16) -> u8 {
        let offset = addr.wrapping_sub(self.start) as usize;
        self.data.get(offset).copied().unwrap_or(0)
    }

    fn write(&mut self, addr: u16, value: u8) {
        if self.read_only {
            return;
        }
        let offset = addr.wrapping_sub(self.start) as usize;
        if let Some(cell) = self.data.get_mut(offset) {
            *cell = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_filled_block() {
        let block = MemoryBlock::filled(0x2000, 0x20FF, 0xEA, false).unwrap();
        assert_eq!(block.len(), 256);
        assert!(block.as_slice().iter().all(|&b| b == 0xEA));
    }

    #[test]
    fn test_invalid_range_rejected() {
        let err = MemoryBlock::ram(0x2000, 0x1FFF).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidRange {
                start: 0x2000,
                end: 0x1FFF
            }
        ));
    }

    #[test]
    fn test_claims_respect_range_and_direction() {
        let ram = MemoryBlock::ram(0x1000, 0x1FFF).unwrap();
        assert!(ram.claims(0x1000, Access::Read));
        assert!(ram.claims(0x1FFF, Access::Write));
        assert!(!ram.claims(0x0FFF, Access::Read));
        assert!(!ram.claims(0x2000, Access::Write));

        let rom = MemoryBlock::filled(0xE000, 0xFFFF, 0, true).unwrap();
        assert!(rom.claims(0xFFFF, Access::Read));
        assert!(!rom.claims(0xFFFF, Access::Write));
    }

    #[test]
    fn test_read_write_absolute_addresses() {
        let mut ram = MemoryBlock::ram(0x0200, 0x02FF).unwrap();
        ram.write(0x0200, 0x11);
        ram.write(0x02FF, 0x22);

        assert_eq!(ram.read(0x0200), 0x11);
        assert_eq!(ram.read(0x02FF), 0x22);
        assert_eq!(ram.as_slice()[0], 0x11);
        assert_eq!(ram.as_slice()[0xFF], 0x22);
    }

    #[test]
    fn test_unclaimed_read_is_zero() {
        let mut ram = MemoryBlock::filled(0x0200, 0x02FF, 0xAA, false).unwrap();
        assert_eq!(ram.read(0x0100), 0x00);
        assert_eq!(ram.read(0x0300), 0x00);
    }

    #[test]
    fn test_from_bytes_too_long() {
        let err = MemoryBlock::from_bytes(0xFFFE, 0xFFFF, &[1, 2, 3], true).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfBounds { len: 3, .. }));
    }

    #[test]
    fn test_copy_outside_block_rejected() {
        let mut ram = MemoryBlock::ram(0x1000, 0x10FF).unwrap();
        assert!(ram.copy_from(0x0FFF, &[1]).is_err());
        assert!(ram.copy_from(0x1100, &[1]).is_err());
        assert!(ram.copy_from(0x1000, &[]).is_ok());
    }

    #[test]
    fn test_copy_into_read_only_block() {
        let mut rom = MemoryBlock::filled(0xFFFA, 0xFFFF, 0, true).unwrap();
        rom.copy_from(0xFFFC, &[0x00, 0x10]).unwrap();
        assert_eq!(rom.read(0xFFFC), 0x00);
        assert_eq!(rom.read(0xFFFD), 0x10);
    }

    #[test]
    fn test_load_from_reader() {
        let mut ram = MemoryBlock::ram(0x0000, 0x0FFF).unwrap();
        let loaded = ram
            .load_from_reader(Cursor::new(vec![0xA9, 0x01, 0x00]), 0x0400)
            .unwrap();

        assert_eq!(loaded, 3);
        assert_eq!(&ram.as_slice()[0x400..0x403], &[0xA9, 0x01, 0x00]);
    }

    #[test]
    fn test_load_from_reader_overflow_is_all_or_nothing() {
        let mut ram = MemoryBlock::ram(0x0000, 0x00FF).unwrap();
        let err = ram
            .load_from_reader(Cursor::new(vec![0x55; 16]), 0x00F8)
            .unwrap_err();

        assert!(matches!(err, ConfigError::OutOfBounds { .. }));
        assert!(ram.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_load_missing_file() {
        let mut ram = MemoryBlock::ram(0x0000, 0x00FF).unwrap();
        let err = ram
            .load_file("/nonexistent/bus6502/image.bin", 0x0000)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
