//! Hardware interface abstraction
//!
//! This module provides the [`BusInterface`] trait and the [`Interface`]
//! struct for writing to the backpack over I2C.
//!
//! The backpack is a plain 8-bit port expander: each byte written to it is
//! latched onto the controller's pins. The driver never reads from the bus,
//! so a single "write one byte" operation is all it needs.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::i2c::{ErrorType, I2c, Operation};
//! use hd44780_i2c::{BusInterface, Interface};
//! # use core::convert::Infallible;
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
//! let mut interface = Interface::new(MockI2c, 0x27);
//!
//! // Backlight on, all other lines low
//! let _ = interface.write_byte(0x08);
//! ```

use core::fmt::Debug;
use embedded_hal::i2c::I2c;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for the byte transport to the backpack
///
/// This trait abstracts over different hardware implementations, allowing
/// the [`Display`](crate::display::Display) to work with any bus that can
/// deliver single bytes to the port expander.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. Implement this
/// trait directly for buses outside embedded-hal or for test doubles.
pub trait BusInterface {
    /// Error type for bus writes
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Write one byte to the port expander
    ///
    /// # Errors
    ///
    /// Returns an error if the bus transaction fails.
    fn write_byte(&mut self, byte: u8) -> InterfaceResult<(), Self::Error>;
}

impl<T: BusInterface + ?Sized> BusInterface for &mut T {
    type Error = T::Error;

    fn write_byte(&mut self, byte: u8) -> InterfaceResult<(), Self::Error> {
        T::write_byte(self, byte)
    }
}

/// I2C implementation of [`BusInterface`]
///
/// Implements [`BusInterface`] for any embedded-hal v1.0 [`I2c`] bus. Every
/// byte is sent as its own write transaction to `address`.
pub struct Interface<I2C> {
    /// I2C bus
    i2c: I2C,
    /// 7-bit address of the backpack
    address: u8,
}

impl<I2C> Interface<I2C>
where
    I2C: I2c,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `i2c` - I2C bus (must implement [`I2c`])
    /// * `address` - 7-bit address of the backpack
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Get the backpack address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give back the underlying bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> BusInterface for Interface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn write_byte(&mut self, byte: u8) -> InterfaceResult<(), Self::Error> {
        self.i2c.write(self.address, &[byte])
    }
}
