//! Composite controller settings
//!
//! The controller has no per-bit instructions for the display, cursor and
//! blink flags: one "display control" instruction carries all three, and one
//! "entry mode" instruction carries the cursor direction together with the
//! display-shift flag. These types hold each group as a single value so that
//! changing one flag always re-sends the others unchanged.

use crate::command::{
    CONTROL_BLINK_ON, CONTROL_CURSOR_ON, CONTROL_DISPLAY_ON, DISPLAY_CONTROL, ENTRY_INCREMENT,
    ENTRY_MODE_SET, ENTRY_SHIFT,
};

/// Horizontal direction for cursor movement and shifts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Towards lower addresses
    Left,
    /// Towards higher addresses
    #[default]
    Right,
}

impl Direction {
    /// Address step for one cell in this direction
    pub fn step(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// Display, cursor and blink flags
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayControl {
    /// Whether DDRAM contents are shown
    pub display: bool,
    /// Whether the underline cursor is shown
    pub cursor: bool,
    /// Whether the blinking block cursor is shown
    pub blink: bool,
}

impl Default for DisplayControl {
    /// Display on, both cursors off (the state after init)
    fn default() -> Self {
        Self {
            display: true,
            cursor: false,
            blink: false,
        }
    }
}

impl DisplayControl {
    /// Display control instruction carrying all three flags
    pub fn instruction(self) -> u8 {
        let mut instruction = DISPLAY_CONTROL;
        if self.display {
            instruction |= CONTROL_DISPLAY_ON;
        }
        if self.cursor {
            instruction |= CONTROL_CURSOR_ON;
        }
        if self.blink {
            instruction |= CONTROL_BLINK_ON;
        }
        instruction
    }
}

/// Cursor direction and display-shift flag applied after each write
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EntryMode {
    /// Direction the cursor moves after a write
    pub direction: Direction,
    /// Whether the whole display shifts after a write
    pub shift: bool,
}

impl EntryMode {
    /// Entry mode instruction carrying both fields
    pub fn instruction(self) -> u8 {
        let mut instruction = ENTRY_MODE_SET;
        if self.direction == Direction::Right {
            instruction |= ENTRY_INCREMENT;
        }
        if self.shift {
            instruction |= ENTRY_SHIFT;
        }
        instruction
    }
}
