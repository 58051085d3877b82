//! HD44780 instruction definitions
//!
//! This module defines the instruction bytes understood by the HD44780
//! controller and the bit layout of the I2C backpack that carries them.
//!
//! ## Backpack Byte Layout
//!
//! Every byte written to the backpack drives the controller pins directly:
//!
//! | Bit | Signal                          |
//! |-----|---------------------------------|
//! | 7-4 | D7-D4 (one nibble)              |
//! | 3   | Backlight                       |
//! | 2   | E (enable, latches on high→low) |
//! | 1   | R/W (always write)              |
//! | 0   | RS (0 = instruction, 1 = data)  |
//!
//! An 8-bit instruction therefore takes four bus writes; see
//! [`encoder`](crate::encoder).
//!
//! ## Example
//!
//! ```
//! use hd44780_i2c::command;
//!
//! // Display on, cursor on, blink off
//! let instruction = command::DISPLAY_CONTROL | command::CONTROL_DISPLAY_ON | command::CONTROL_CURSOR_ON;
//! assert_eq!(instruction, 0x0E);
//! assert_eq!(command::set_ddram_address(0x40), 0xC0);
//! ```

use crate::config::Lines;
use crate::state::Direction;

// Backpack bits

/// Backlight bit, and the complete "backlight on" byte (0x08)
pub const BACKLIGHT_ON: u8 = 0x08;

/// "Backlight off" byte (0x00)
pub const BACKLIGHT_OFF: u8 = 0x00;

/// Enable bit (0x04)
pub const ENABLE: u8 = 0x04;

/// Register select bit (0x01), set for data writes
pub const REGISTER_SELECT: u8 = 0x01;

// Instructions

/// Clear display instruction (0x01)
///
/// Fills DDRAM with spaces and sets the address counter to 0.
pub const CLEAR_DISPLAY: u8 = 0x01;

/// Entry mode set instruction (0x04)
///
/// Combine with [`ENTRY_INCREMENT`] and [`ENTRY_SHIFT`].
pub const ENTRY_MODE_SET: u8 = 0x04;

/// Entry mode: move the cursor right after each write (0x02)
pub const ENTRY_INCREMENT: u8 = 0x02;

/// Entry mode: shift the whole display after each write (0x01)
pub const ENTRY_SHIFT: u8 = 0x01;

/// Display on/off control instruction (0x08)
///
/// Carries the display, cursor and blink bits together.
pub const DISPLAY_CONTROL: u8 = 0x08;

/// Display control: display on (0x04)
pub const CONTROL_DISPLAY_ON: u8 = 0x04;

/// Display control: underline cursor on (0x02)
pub const CONTROL_CURSOR_ON: u8 = 0x02;

/// Display control: blinking block cursor on (0x01)
pub const CONTROL_BLINK_ON: u8 = 0x01;

/// Cursor or display shift instruction (0x10)
pub const CURSOR_SHIFT: u8 = 0x10;

/// Shift: move the display instead of the cursor (0x08)
pub const SHIFT_DISPLAY: u8 = 0x08;

/// Shift: move right instead of left (0x04)
pub const SHIFT_RIGHT: u8 = 0x04;

/// Function set instruction (0x20)
///
/// On its own this selects the 4-bit bus, one line, 5x8 font.
pub const FUNCTION_SET: u8 = 0x20;

/// Function set: two display lines (0x08)
pub const FUNCTION_TWO_LINES: u8 = 0x08;

/// Set DDRAM address instruction (0x80)
///
/// The low seven bits carry the address.
pub const SET_DDRAM_ADDRESS: u8 = 0x80;

/// Nibble sent on its own during init to switch the controller to the 4-bit bus
pub const FOUR_BIT_SWITCH_NIBBLE: u8 = (FUNCTION_SET >> 4) & 0x0F;

/// Function set instruction for the given line mode
pub const fn function_set(lines: Lines) -> u8 {
    match lines {
        Lines::One => FUNCTION_SET,
        Lines::Two => FUNCTION_SET | FUNCTION_TWO_LINES,
    }
}

/// Set DDRAM address instruction for `addr`
pub const fn set_ddram_address(addr: u8) -> u8 {
    SET_DDRAM_ADDRESS | (addr & 0x7F)
}

/// Move the cursor one cell without touching DDRAM
pub const fn cursor_shift(direction: Direction) -> u8 {
    match direction {
        Direction::Left => CURSOR_SHIFT,
        Direction::Right => CURSOR_SHIFT | SHIFT_RIGHT,
    }
}

/// Move the whole display one cell; DDRAM and the cursor address are unchanged
pub const fn display_shift(direction: Direction) -> u8 {
    match direction {
        Direction::Left => CURSOR_SHIFT | SHIFT_DISPLAY,
        Direction::Right => CURSOR_SHIFT | SHIFT_DISPLAY | SHIFT_RIGHT,
    }
}
