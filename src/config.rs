//! Display configuration types and builder

use crate::address::{ONE_LINE_CAPACITY, TWO_LINE_CAPACITY};
use crate::charset::RomVariant;
pub use crate::error::{BuilderError, MAX_I2C_ADDRESS, MIN_I2C_ADDRESS};

/// Number of display lines the controller is configured for
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lines {
    /// One line of 80 cells
    One,
    /// Two lines of 40 cells each
    #[default]
    Two,
}

impl Lines {
    /// Create a line mode from a line count
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidLines` unless `count` is 1 or 2.
    pub fn new(count: u8) -> Result<Self, BuilderError> {
        match count {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            _ => Err(BuilderError::InvalidLines { lines: count }),
        }
    }

    /// Number of lines
    pub fn count(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// Number of cells in a single row
    pub fn row_capacity(self) -> usize {
        match self {
            Self::One => ONE_LINE_CAPACITY,
            Self::Two => TWO_LINE_CAPACITY,
        }
    }
}

/// Display configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// 7-bit I2C address of the backpack
    pub address: u8,
    /// Line mode
    pub lines: Lines,
    /// Character ROM fitted to the controller
    pub rom: RomVariant,
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use hd44780_i2c::{Builder, Lines, RomVariant};
///
/// let config = match Builder::new().address(0x27).lines(Lines::Two).rom(RomVariant::A00).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.address, 0x27);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    /// I2C address (required)
    address: Option<u8>,
    lines: Lines,
    rom: RomVariant,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the I2C address (required)
    pub fn address(mut self, address: u8) -> Self {
        self.address = Some(address);
        self
    }

    /// Set the line mode (default two lines)
    pub fn lines(mut self, lines: Lines) -> Self {
        self.lines = lines;
        self
    }

    /// Set the character ROM variant (default A00)
    pub fn rom(mut self, rom: RomVariant) -> Self {
        self.rom = rom;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// - `BuilderError::MissingAddress` if no address was set
    /// - `BuilderError::InvalidAddress` if the address is outside `0x03..=0x77`
    pub fn build(self) -> Result<Config, BuilderError> {
        let address = self.address.ok_or(BuilderError::MissingAddress)?;
        if !(MIN_I2C_ADDRESS..=MAX_I2C_ADDRESS).contains(&address) {
            return Err(BuilderError::InvalidAddress { address });
        }
        Ok(Config {
            address,
            lines: self.lines,
            rom: self.rom,
        })
    }
}
