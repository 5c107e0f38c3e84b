//! Configuration errors.
//!
//! Everything that can go wrong while assembling a machine: device ranges,
//! program images and byte loads. Execution itself never fails (see
//! `CPU::step`), so this is the crate's only error type.

use std::io;

use thiserror::Error;

/// Result alias for machine and device configuration.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Error raised while building or loading a machine configuration.
///
/// A machine that produced one of these must not be reset or stepped.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Program image does not fit below the stack and zero pages.
    #[error("image too large: {len} bytes, maximum is {max} bytes")]
    ImageTooLarge { len: usize, max: usize },

    /// Program image cannot contain the reset vector.
    #[error("image too small: {len} bytes, need at least {min} bytes for the reset vector")]
    ImageTooSmall { len: usize, min: usize },

    /// A copy would run past the end of the target block.
    #[error(
        "{len} bytes at 0x{address:04X} do not fit in block 0x{start:04X}-0x{end:04X}"
    )]
    OutOfBounds {
        address: u16,
        len: usize,
        start: u16,
        end: u16,
    },

    /// Block end address lies below its start address.
    #[error("invalid address range 0x{start:04X}-0x{end:04X}")]
    InvalidRange { start: u16, end: u16 },

    /// Reading an external byte source failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_numbers() {
        let err = ConfigError::ImageTooLarge {
            len: 70000,
            max: 0xFDFF,
        };
        assert_eq!(
            err.to_string(),
            "image too large: 70000 bytes, maximum is 65023 bytes"
        );

        let err = ConfigError::OutOfBounds {
            address: 0x10FE,
            len: 4,
            start: 0x1000,
            end: 0x10FF,
        };
        assert_eq!(
            err.to_string(),
            "4 bytes at 0x10FE do not fit in block 0x1000-0x10FF"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = io::Error::new(io::ErrorKind::NotFound, "missing.bin");
        let err: ConfigError = io.into();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
