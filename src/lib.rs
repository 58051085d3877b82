//! HD44780 Character LCD Driver
//!
//! A driver for HD44780-compatible character LCDs wired to a PCF8574-style
//! I2C backpack in 4-bit mode.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - One-line (80 cells) and two-line (2x40 cells) layouts
//! - Newline handling with emulated scrolling
//! - A00 and A02 character ROM lookup
//! - Persistent display state, so a display can be reopened without
//!   re-initializing it (`FileStore` requires the `std` feature)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::i2c::{ErrorType, I2c, Operation};
//! use hd44780_i2c::{Builder, CursorRef, Display, Interface, Lines, MemoryStore};
//!
//! # struct MockI2c;
//! # impl ErrorType for MockI2c { type Error = Infallible; }
//! # impl I2c for MockI2c {
//! #     fn transaction(
//! #         &mut self,
//! #         _address: u8,
//! #         _operations: &mut [Operation<'_>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # let i2c = MockI2c;
//! let config = match Builder::new().address(0x27).lines(Lines::Two).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let interface = Interface::new(i2c, config.address);
//!
//! let Ok(mut display) = Display::open(interface, MemoryStore::new(), config) else {
//!     return;
//! };
//! let _ = display.print(format_args!("Temp: {}°C", 21));
//! let _ = display.seek_cursor(CursorRef::Line2Start, 0);
//! let _ = display.set_blink(true);
//! ```

#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

/// DDRAM address arithmetic
pub mod address;
/// Character ROM lookup
pub mod charset;
/// HD44780 instruction and backpack bit definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Nibble encoding for the 4-bit bus
pub mod encoder;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// Shadow copy of DDRAM
pub mod shadow;
/// State record layout
pub mod snapshot;
/// Composite controller settings
pub mod state;
/// Durable storage for the state record
pub mod storage;
/// Character output and newline handling
pub mod writer;

#[cfg(test)]
mod test_support;

pub use address::CursorRef;
pub use charset::RomVariant;
pub use config::{Builder, Config, Lines, MAX_I2C_ADDRESS, MIN_I2C_ADDRESS};
pub use display::Display;
pub use error::{BuilderError, Error, SnapshotError};
pub use interface::{BusInterface, Interface};
pub use shadow::Row;
pub use snapshot::{SNAPSHOT_LEN, Snapshot};
pub use state::{Direction, DisplayControl, EntryMode};
pub use storage::{MemoryStore, MemoryStoreError, SnapshotStore};

#[cfg(feature = "std")]
pub use storage::FileStore;
