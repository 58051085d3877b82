//! Character output
//!
//! The controller has no scrolling of its own. A newline on the second row
//! is emulated by reading the row back from the shadow buffer, clearing the
//! screen and writing the row again on the first line.
//!
//! ## Example
//!
//! ```
//! use core::fmt::Write;
//! use hd44780_i2c::{Builder, BusInterface, Display, MemoryStore, Row};
//! # use core::convert::Infallible;
//! # struct Bus;
//! # impl BusInterface for Bus {
//! #     type Error = Infallible;
//! #     fn write_byte(&mut self, _byte: u8) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! let config = match Builder::new().address(0x27).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let Ok(mut display) = Display::open(Bus, MemoryStore::new(), config) else {
//!     return;
//! };
//!
//! let _ = display.print(format_args!("Linea1\nLinea2\nLinea3"));
//! assert_eq!(&display.row(Row::First)[..6], b"Linea2");
//! assert_eq!(&display.row(Row::Second)[..6], b"Linea3");
//!
//! let _ = write!(display, "\n{}C", 21);
//! ```

use core::fmt;

use log::{debug, warn};

use crate::address::{ONE_LINE_CAPACITY, ROW2_END, ROW2_START};
use crate::config::Lines;
use crate::display::{Display, DisplayResult};
use crate::error::Error;
use crate::interface::BusInterface;
use crate::state::DisplayControl;
use crate::storage::SnapshotStore;

impl<I, S> Display<I, S>
where
    I: BusInterface,
    S: SnapshotStore,
{
    /// Write one character at the cursor
    ///
    /// - `'\0'` is ignored.
    /// - `'\n'` clears a one-line display. On two lines it moves from the
    ///   first row to the second, or scrolls the second row up when the
    ///   cursor is on row 2 or row 2 has just been filled. The scroll blanks
    ///   the display while it rewrites DDRAM, then restores the display flag
    ///   it had before the newline, so a display switched off stays off.
    /// - Anything else is looked up in the character ROM (unknown characters
    ///   become a space) and the cursor advances in the entry direction.
    pub fn put_char(&mut self, c: char) -> DisplayResult<I, S> {
        match c {
            '\0' => Ok(()),
            '\n' => self.newline(),
            _ => {
                let code = self.state.rom.code(c);
                let result = self.write_code(code);
                self.settle(result)
            }
        }
    }

    /// Render `args` and write the result
    ///
    /// Output is cut to the length of one row (80 characters on one line,
    /// 40 on two). Writing stops at the first failing character.
    ///
    /// # Errors
    ///
    /// Returns `Error::Format` if a formatting implementation fails, or the
    /// error of the first character that could not be written.
    pub fn print(&mut self, args: fmt::Arguments<'_>) -> DisplayResult<I, S> {
        let mut rendered = Truncated::new(self.state.lines.row_capacity());
        fmt::write(&mut rendered, args).map_err(|_| Error::Format)?;
        rendered
            .chars
            .iter()
            .try_for_each(|c| self.put_char(*c))
    }

    fn newline(&mut self) -> DisplayResult<I, S> {
        match self.state.lines {
            Lines::One => self.clear(),
            Lines::Two if self.state.cursor < ROW2_START && !self.state.row2_full => {
                let result = self.move_cursor(ROW2_START);
                self.settle(result)
            }
            Lines::Two => {
                let result = self.scroll();
                self.settle(result)
            }
        }
    }

    /// Move the text before the cursor on row 2 up to row 1
    ///
    /// A full row 2 moves up in its entirety.
    fn scroll(&mut self) -> DisplayResult<I, S> {
        let lines = self.state.lines;
        let end = if self.state.row2_full {
            ROW2_END + 1
        } else {
            self.state.cursor
        };
        let captured = self.state.shadow.row2_prefix(lines, end);
        let restore = self.state.control;
        debug!("scrolling {} cells to row 1", captured.len());

        self.write_control(DisplayControl {
            display: false,
            ..restore
        })?;
        self.clear_ddram()?;
        for code in captured {
            self.write_code(code)?;
        }
        self.move_cursor(ROW2_START)?;
        self.write_control(restore)
    }
}

impl<I, S> fmt::Write for Display<I, S>
where
    I: BusInterface,
    S: SnapshotStore,
{
    /// Stream `s` through [`Display::put_char`] without truncation
    fn write_str(&mut self, s: &str) -> fmt::Result {
        s.chars().try_for_each(|c| {
            self.put_char(c).map_err(|e| {
                warn!("write aborted: {:?}", e);
                fmt::Error
            })
        })
    }
}

/// Formatting sink that keeps the first `limit` characters
struct Truncated {
    chars: heapless::Vec<char, ONE_LINE_CAPACITY>,
    limit: usize,
}

impl Truncated {
    fn new(limit: usize) -> Self {
        Self {
            chars: heapless::Vec::new(),
            limit: limit.min(ONE_LINE_CAPACITY),
        }
    }
}

impl fmt::Write for Truncated {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.chars.len() >= self.limit {
                break;
            }
            // limit never exceeds the capacity
            let _ = self.chars.push(c);
        }
        Ok(())
    }
}
