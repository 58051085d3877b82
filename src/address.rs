//! DDRAM address arithmetic
//!
//! The HD44780 display data RAM is laid out differently depending on the
//! number of lines the controller was configured for:
//!
//! - **One line**: 80 contiguous cells, addresses `0x00..=0x4F`.
//! - **Two lines**: two disjoint bands of 40 cells, row 1 at `0x00..=0x27`
//!   and row 2 at `0x40..=0x67`. The addresses in between do not exist.
//!
//! Cursor movement on two lines treats both rows as a single 80-cell ring:
//! stepping past the end of row 1 lands on the start of row 2, and stepping
//! past the end of row 2 lands back on the start of row 1.
//!
//! ## Example
//!
//! ```
//! use hd44780_i2c::{address, Lines};
//!
//! assert_eq!(address::shift(Lines::Two, 0x27, 1), 0x40);
//! assert_eq!(address::shift(Lines::Two, 0x00, -1), 0x67);
//! assert_eq!(address::normalize(Lines::Two, 0x30), 0x40);
//! assert_eq!(address::normalize(Lines::One, -1), 0x4F);
//! ```

use crate::config::Lines;

/// Number of cells in one-line mode
pub const ONE_LINE_CAPACITY: usize = 80;
/// Number of cells per row in two-line mode
pub const TWO_LINE_CAPACITY: usize = 40;

/// One-line mode: first address
pub const ONE_LINE_START: u8 = 0x00;
/// One-line mode: last address
pub const ONE_LINE_END: u8 = 0x4F;

/// Two-line mode: first address of row 1
pub const ROW1_START: u8 = 0x00;
/// Two-line mode: last address of row 1
pub const ROW1_END: u8 = 0x27;
/// Two-line mode: first address of row 2
pub const ROW2_START: u8 = 0x40;
/// Two-line mode: last address of row 2
pub const ROW2_END: u8 = 0x67;

/// Modulus applied to raw addresses in two-line mode
///
/// NOTE: this is `0xFF`, not `0x100`. It only matters for raw inputs at or
/// beyond `0xFF`, which are outside the controller's address range anyway.
const TWO_LINE_MODULUS: i32 = 0xFF;

/// Reference point for [`resolve`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorRef {
    /// First cell of the first line
    Line1Start,
    /// Last cell of the first line
    Line1End,
    /// First cell of the second line (first cell of the line in one-line mode)
    Line2Start,
    /// Last cell of the second line (last cell of the line in one-line mode)
    Line2End,
    /// The current cursor address
    Current,
}

/// Map an arbitrary address onto the valid address set for `lines`
///
/// - One line: `addr mod 80`, always non-negative.
/// - Two lines: `addr mod 0xFF`; results in the gap between the rows snap to
///   the start of row 2, results beyond row 2 snap to the start of row 1.
pub fn normalize(lines: Lines, addr: i32) -> u8 {
    match lines {
        Lines::One => addr.rem_euclid(ONE_LINE_CAPACITY as i32) as u8,
        Lines::Two => {
            let wrapped = addr.rem_euclid(TWO_LINE_MODULUS);
            if wrapped > i32::from(ROW1_END) && wrapped < i32::from(ROW2_START) {
                ROW2_START
            } else if wrapped > i32::from(ROW2_END) {
                ROW1_START
            } else {
                wrapped as u8
            }
        }
    }
}

/// Whether `addr` is a DDRAM address that exists in `lines` mode
pub fn is_valid(lines: Lines, addr: u8) -> bool {
    match lines {
        Lines::One => addr <= ONE_LINE_END,
        Lines::Two => addr <= ROW1_END || (ROW2_START..=ROW2_END).contains(&addr),
    }
}

/// Position of an address in the 80-cell ring
///
/// One line: the address itself. Two lines: row 1 maps to `0..40` and row 2
/// to `40..80`. The address is normalized first.
pub fn ring_index(lines: Lines, addr: u8) -> usize {
    let addr = normalize(lines, i32::from(addr));
    match lines {
        Lines::One => addr as usize,
        Lines::Two if addr >= ROW2_START => TWO_LINE_CAPACITY + (addr - ROW2_START) as usize,
        Lines::Two => addr as usize,
    }
}

/// Inverse of [`ring_index`]
fn from_ring_index(lines: Lines, index: usize) -> u8 {
    match lines {
        Lines::One => index as u8,
        Lines::Two if index >= TWO_LINE_CAPACITY => ROW2_START + (index - TWO_LINE_CAPACITY) as u8,
        Lines::Two => index as u8,
    }
}

/// Move `addr` by `offset` cells with wraparound
///
/// One line is plain modular arithmetic over 80 cells. Two lines walk the
/// 80-cell ring formed by both rows, so leaving one row continues on the
/// other one. For every valid `a` and any `k`,
/// `shift(lines, shift(lines, a, k), -k) == normalize(lines, a)`.
pub fn shift(lines: Lines, addr: u8, offset: i32) -> u8 {
    let ring = ONE_LINE_CAPACITY as i32;
    let offset = offset % ring;
    let index = ring_index(lines, addr) as i32;
    from_ring_index(lines, (index + offset).rem_euclid(ring) as usize)
}

/// Resolve a seek request to an absolute address
///
/// In one-line mode the line 2 references resolve to the start and end of
/// the single line.
pub fn resolve(lines: Lines, reference: CursorRef, current: u8, offset: i32) -> u8 {
    let base = match (reference, lines) {
        (CursorRef::Line1Start | CursorRef::Line2Start, Lines::One) => ONE_LINE_START,
        (CursorRef::Line1End | CursorRef::Line2End, Lines::One) => ONE_LINE_END,
        (CursorRef::Line1Start, Lines::Two) => ROW1_START,
        (CursorRef::Line1End, Lines::Two) => ROW1_END,
        (CursorRef::Line2Start, Lines::Two) => ROW2_START,
        (CursorRef::Line2End, Lines::Two) => ROW2_END,
        (CursorRef::Current, _) => current,
    };
    shift(lines, base, offset)
}
