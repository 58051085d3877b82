//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`]),
//! snapshot decoding ([`SnapshotError`]) and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`SnapshotError`] - A stored state record that cannot be decoded
//! - [`Error`] - Runtime errors during display operations
//!
//! A display handle is an owned value, so there is no "invalid handle" error,
//! and all buffers are fixed-size, so opening a display never allocates.
//!
//! ## Example
//!
//! ```
//! use hd44780_i2c::{Builder, BuilderError, Lines};
//!
//! // Missing address
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingAddress)));
//!
//! // Reserved I2C address
//! let result = Builder::new().address(0x78).build();
//! assert!(matches!(result, Err(BuilderError::InvalidAddress { address: 0x78 })));
//!
//! // Unsupported line count
//! assert!(Lines::new(4).is_err());
//! ```

use core::fmt;

use crate::interface::BusInterface;
use crate::storage::SnapshotStore;

/// Lowest usable 7-bit I2C address
///
/// 0x00-0x02 are reserved by the I2C specification.
pub const MIN_I2C_ADDRESS: u8 = 0x03;

/// Highest usable 7-bit I2C address
///
/// 0x78-0x7F are reserved by the I2C specification.
pub const MAX_I2C_ADDRESS: u8 = 0x77;

/// Errors that can occur when interacting with the display
///
/// Generic over the bus and the snapshot store to preserve their specific
/// error types.
pub enum Error<I: BusInterface, S: SnapshotStore> {
    /// Bus write failed
    ///
    /// Wraps the underlying error from the [`BusInterface`] implementation.
    /// The controller may have received part of a transfer.
    Transport(I::Error),
    /// Snapshot store failed to read or write the state record
    Storage(S::Error),
    /// The stored record is shorter than a complete snapshot
    ShortSnapshot {
        /// Size of a complete record in bytes
        expected: usize,
        /// Bytes actually read
        read: usize,
    },
    /// The stored record could not be decoded
    Snapshot(SnapshotError),
    /// The stored record belongs to a display at another address
    ///
    /// The record is left untouched.
    AddressMismatch {
        /// Address found in the record
        stored: u8,
        /// Address the display was opened with
        requested: u8,
    },
    /// A formatting implementation returned an error while rendering text
    Format,
}

impl<I: BusInterface, S: SnapshotStore> fmt::Debug for Error<I, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => f.debug_tuple("Transport").field(e).finish(),
            Self::Storage(e) => f.debug_tuple("Storage").field(e).finish(),
            Self::ShortSnapshot { expected, read } => f
                .debug_struct("ShortSnapshot")
                .field("expected", expected)
                .field("read", read)
                .finish(),
            Self::Snapshot(e) => f.debug_tuple("Snapshot").field(e).finish(),
            Self::AddressMismatch { stored, requested } => f
                .debug_struct("AddressMismatch")
                .field("stored", stored)
                .field("requested", requested)
                .finish(),
            Self::Format => f.write_str("Format"),
        }
    }
}

impl<I: BusInterface, S: SnapshotStore> fmt::Display for Error<I, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "Bus error: {e:?}"),
            Self::Storage(e) => write!(f, "Snapshot storage error: {e:?}"),
            Self::ShortSnapshot { expected, read } => {
                write!(
                    f,
                    "Short snapshot: expected {expected} bytes, read {read}"
                )
            }
            Self::Snapshot(e) => write!(f, "Invalid snapshot: {e}"),
            Self::AddressMismatch { stored, requested } => {
                write!(
                    f,
                    "Snapshot is for address {stored:#04x}, requested {requested:#04x}"
                )
            }
            Self::Format => write!(f, "Formatting error"),
        }
    }
}

impl<I: BusInterface, S: SnapshotStore> core::error::Error for Error<I, S> {}

/// Reasons a stored state record is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotError {
    /// Unknown record format version
    UnsupportedVersion(u8),
    /// Line count other than 1 or 2
    InvalidLines(u8),
    /// Unknown character ROM identifier
    InvalidRom(u8),
    /// A boolean field holds something other than 0 or 1
    InvalidFlag {
        /// Byte offset of the field
        offset: usize,
        /// Value found
        value: u8,
    },
    /// Cursor address outside the valid set for the stored line mode
    InvalidCursor(u8),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion(v) => write!(f, "unsupported version {v}"),
            Self::InvalidLines(lines) => write!(f, "invalid line count {lines}"),
            Self::InvalidRom(rom) => write!(f, "invalid ROM identifier {rom}"),
            Self::InvalidFlag { offset, value } => {
                write!(f, "invalid flag {value} at offset {offset}")
            }
            Self::InvalidCursor(addr) => write!(f, "invalid cursor address {addr:#04x}"),
        }
    }
}

impl core::error::Error for SnapshotError {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderError {
    /// Address was not specified
    ///
    /// [`Builder::address()`](crate::config::Builder::address) must be called before building.
    MissingAddress,
    /// I2C address outside the usable 7-bit range
    InvalidAddress {
        /// Address requested
        address: u8,
    },
    /// Unsupported number of lines
    ///
    /// See [`Lines::new()`](crate::config::Lines::new).
    InvalidLines {
        /// Line count requested
        lines: u8,
    },
}

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAddress => write!(f, "Address must be specified"),
            Self::InvalidAddress { address } => write!(
                f,
                "Invalid address {address:#04x} (must be {MIN_I2C_ADDRESS:#04x}..={MAX_I2C_ADDRESS:#04x})"
            ),
            Self::InvalidLines { lines } => {
                write!(f, "Invalid line count {lines} (must be 1 or 2)")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
