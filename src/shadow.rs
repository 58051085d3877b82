//! Shadow copy of DDRAM
//!
//! The backpack is write-only, so the driver remembers which ROM code it put
//! in every cell. The newline emulation reads this copy back to move the
//! second row up.

use crate::address::{self, ONE_LINE_CAPACITY, ROW2_START, TWO_LINE_CAPACITY};
use crate::charset::SPACE;
use crate::config::Lines;

/// Row selector for reading the shadow buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Row {
    /// Row 1, or the only row in one-line mode
    First,
    /// Row 2 (empty in one-line mode)
    Second,
}

/// ROM codes resident in DDRAM, indexed by ring position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShadowBuffer {
    cells: [u8; ONE_LINE_CAPACITY],
}

impl Default for ShadowBuffer {
    fn default() -> Self {
        Self {
            cells: [SPACE; ONE_LINE_CAPACITY],
        }
    }
}

impl ShadowBuffer {
    pub(crate) fn from_cells(cells: [u8; ONE_LINE_CAPACITY]) -> Self {
        Self { cells }
    }

    pub(crate) fn cells(&self) -> &[u8; ONE_LINE_CAPACITY] {
        &self.cells
    }

    /// Record `code` at DDRAM address `addr`
    pub fn set(&mut self, lines: Lines, addr: u8, code: u8) {
        self.cells[address::ring_index(lines, addr)] = code;
    }

    /// Reset every cell to the blank glyph
    pub fn clear(&mut self) {
        self.cells = [SPACE; ONE_LINE_CAPACITY];
    }

    /// Cells of one row
    pub fn row(&self, lines: Lines, row: Row) -> &[u8] {
        match (lines, row) {
            (Lines::One, Row::First) => &self.cells,
            (Lines::One, Row::Second) => &[],
            (Lines::Two, Row::First) => &self.cells[..TWO_LINE_CAPACITY],
            (Lines::Two, Row::Second) => &self.cells[TWO_LINE_CAPACITY..],
        }
    }

    /// Copy of row 2 up to (not including) the cursor at `cursor`
    ///
    /// Empty unless `cursor` is in row 2 of a two-line layout.
    pub fn row2_prefix(&self, lines: Lines, cursor: u8) -> heapless::Vec<u8, TWO_LINE_CAPACITY> {
        let mut captured = heapless::Vec::new();
        if lines == Lines::Two && cursor >= ROW2_START {
            let len = ((cursor - ROW2_START) as usize).min(TWO_LINE_CAPACITY);
            // len never exceeds the capacity, so extend cannot fail
            let _ = captured.extend_from_slice(&self.row(lines, Row::Second)[..len]);
        }
        captured
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_split_at_ring_midpoint() {
        let mut shadow = ShadowBuffer::default();
        shadow.set(Lines::Two, 0x00, b'a');
        shadow.set(Lines::Two, 0x40, b'b');
        shadow.set(Lines::Two, 0x67, b'c');

        assert_eq!(shadow.row(Lines::Two, Row::First)[0], b'a');
        assert_eq!(shadow.row(Lines::Two, Row::Second)[0], b'b');
        assert_eq!(shadow.row(Lines::Two, Row::Second)[39], b'c');
        assert_eq!(shadow.row(Lines::Two, Row::First).len(), 40);
        assert_eq!(shadow.row(Lines::One, Row::First).len(), 80);
        assert!(shadow.row(Lines::One, Row::Second).is_empty());
    }

    #[test]
    fn test_row2_prefix() {
        let mut shadow = ShadowBuffer::default();
        for (i, code) in b"Linea2".iter().enumerate() {
            shadow.set(Lines::Two, 0x40 + i as u8, *code);
        }
        assert_eq!(shadow.row2_prefix(Lines::Two, 0x46).as_slice(), b"Linea2");
        assert_eq!(shadow.row2_prefix(Lines::Two, 0x43).as_slice(), b"Lin");
        assert!(shadow.row2_prefix(Lines::Two, 0x10).is_empty());
        assert!(shadow.row2_prefix(Lines::One, 0x46).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut shadow = ShadowBuffer::default();
        shadow.set(Lines::One, 0x10, b'x');
        shadow.clear();
        assert!(shadow.cells().iter().all(|c| *c == SPACE));
    }
}
