//! Nibble encoding for the 4-bit backpack bus
//!
//! The backpack only wires D7-D4, so every 8-bit instruction or data value
//! travels as two nibbles, high nibble first. The controller latches a nibble
//! on the falling edge of the enable line, so each nibble is written twice:
//! once with enable high and once with enable low.
//!
//! The backlight shares the byte with the data and control lines, which means
//! every byte must carry the current backlight bit or the light would flicker
//! off for the duration of the transfer.
//!
//! ## Example
//!
//! ```
//! use hd44780_i2c::encoder::{encode, Register};
//!
//! // Clear display, backlight on
//! assert_eq!(encode(Register::Command, 0x01, true), [0x0C, 0x08, 0x1C, 0x18]);
//! // Data 'A', backlight off
//! assert_eq!(encode(Register::Data, b'A', false), [0x45, 0x41, 0x15, 0x11]);
//! ```

use crate::command::{BACKLIGHT_ON, ENABLE, REGISTER_SELECT};
use crate::interface::BusInterface;

/// Controller register targeted by a write
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Register {
    /// Instruction register (RS low)
    Command,
    /// Data register (RS high), writes to DDRAM at the cursor
    Data,
}

impl Register {
    /// Control bits shared by every byte of a transfer
    fn flags(self, backlight: bool) -> u8 {
        let mut flags = match self {
            Self::Command => 0x00,
            Self::Data => REGISTER_SELECT,
        };
        if backlight {
            flags |= BACKLIGHT_ON;
        }
        flags
    }
}

/// Encode a single nibble as an enable-high, enable-low byte pair
pub fn encode_nibble(register: Register, nibble: u8, backlight: bool) -> [u8; 2] {
    let base = ((nibble & 0x0F) << 4) | register.flags(backlight);
    [base | ENABLE, base]
}

/// Encode an 8-bit value as the four bytes written to the backpack
pub fn encode(register: Register, value: u8, backlight: bool) -> [u8; 4] {
    let [high_e1, high_e0] = encode_nibble(register, value >> 4, backlight);
    let [low_e1, low_e0] = encode_nibble(register, value & 0x0F, backlight);
    [high_e1, high_e0, low_e1, low_e0]
}

/// Write `bytes` one at a time, stopping at the first failure
///
/// A failure part way through leaves the controller with a partial transfer;
/// nothing is rolled back.
pub fn transmit<B: BusInterface>(bus: &mut B, bytes: &[u8]) -> Result<(), B::Error> {
    for &byte in bytes {
        bus.write_byte(byte)?;
    }
    Ok(())
}
