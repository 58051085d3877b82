//! Fixed-size binary record of the display state
//!
//! ## Record Layout
//!
//! | Offset  | Field                                   |
//! |---------|-----------------------------------------|
//! | 0       | Format version ([`SNAPSHOT_VERSION`])   |
//! | 1       | I2C address                             |
//! | 2       | Line count (1 or 2)                     |
//! | 3       | ROM variant (0 = A00, 1 = A02)          |
//! | 4       | Cursor address                          |
//! | 5       | Backlight (0/1)                         |
//! | 6       | Display on (0/1)                        |
//! | 7       | Cursor on (0/1)                         |
//! | 8       | Blink on (0/1)                          |
//! | 9       | Entry direction (0 = left, 1 = right)   |
//! | 10      | Entry display shift (0/1)               |
//! | 11      | Transport placeholder (always 0)        |
//! | 12      | Row 2 filled and wrapped (0/1)          |
//! | 13..93  | Shadow buffer cells                     |

use crate::address::{self, ONE_LINE_CAPACITY};
use crate::charset::RomVariant;
use crate::config::Lines;
use crate::error::SnapshotError;
use crate::shadow::ShadowBuffer;
use crate::state::{Direction, DisplayControl, EntryMode};

/// Current record format version
pub const SNAPSHOT_VERSION: u8 = 2;

const HEADER_LEN: usize = 13;

/// Size of an encoded record in bytes
pub const SNAPSHOT_LEN: usize = HEADER_LEN + ONE_LINE_CAPACITY;

const OFFSET_BACKLIGHT: usize = 5;
const OFFSET_DISPLAY: usize = 6;
const OFFSET_CURSOR_ON: usize = 7;
const OFFSET_BLINK: usize = 8;
const OFFSET_DIRECTION: usize = 9;
const OFFSET_SHIFT: usize = 10;
const OFFSET_ROW2_FULL: usize = 12;

/// Everything the driver knows about the controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// I2C address of the backpack
    pub address: u8,
    /// Line mode the controller was initialized with
    pub lines: Lines,
    /// Character ROM
    pub rom: RomVariant,
    /// Current DDRAM address
    pub cursor: u8,
    /// Backlight state
    pub backlight: bool,
    /// Display, cursor and blink flags
    pub control: DisplayControl,
    /// Entry mode
    pub entry: EntryMode,
    /// Last character filled the end of row 2 and the cursor wrapped to row 1
    ///
    /// A newline in this state scrolls the whole of row 2 up.
    pub row2_full: bool,
    /// Shadow copy of DDRAM
    pub shadow: ShadowBuffer,
}

impl Snapshot {
    /// State right after the init sequence
    pub fn initial(address: u8, lines: Lines, rom: RomVariant) -> Self {
        Self {
            address,
            lines,
            rom,
            cursor: 0,
            backlight: true,
            control: DisplayControl::default(),
            entry: EntryMode::default(),
            row2_full: false,
            shadow: ShadowBuffer::default(),
        }
    }

    /// Encode into the fixed-size record
    pub fn to_bytes(&self) -> [u8; SNAPSHOT_LEN] {
        let mut record = [0u8; SNAPSHOT_LEN];
        record[0] = SNAPSHOT_VERSION;
        record[1] = self.address;
        record[2] = self.lines.count();
        record[3] = self.rom.to_byte();
        record[4] = self.cursor;
        record[OFFSET_BACKLIGHT] = u8::from(self.backlight);
        record[OFFSET_DISPLAY] = u8::from(self.control.display);
        record[OFFSET_CURSOR_ON] = u8::from(self.control.cursor);
        record[OFFSET_BLINK] = u8::from(self.control.blink);
        record[OFFSET_DIRECTION] = u8::from(self.entry.direction == Direction::Right);
        record[OFFSET_SHIFT] = u8::from(self.entry.shift);
        record[OFFSET_ROW2_FULL] = u8::from(self.row2_full);
        record[HEADER_LEN..].copy_from_slice(self.shadow.cells());
        record
    }

    /// Decode and validate a record
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] naming the first field that fails validation.
    pub fn from_bytes(record: &[u8; SNAPSHOT_LEN]) -> Result<Self, SnapshotError> {
        if record[0] != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(record[0]));
        }
        let lines = Lines::new(record[2]).map_err(|_| SnapshotError::InvalidLines(record[2]))?;
        let rom = RomVariant::from_byte(record[3]).ok_or(SnapshotError::InvalidRom(record[3]))?;
        let cursor = record[4];
        if !address::is_valid(lines, cursor) {
            return Err(SnapshotError::InvalidCursor(cursor));
        }
        let flag = |offset: usize| match record[offset] {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(SnapshotError::InvalidFlag { offset, value }),
        };

        let mut cells = [0u8; ONE_LINE_CAPACITY];
        cells.copy_from_slice(&record[HEADER_LEN..]);

        Ok(Self {
            address: record[1],
            lines,
            rom,
            cursor,
            backlight: flag(OFFSET_BACKLIGHT)?,
            control: DisplayControl {
                display: flag(OFFSET_DISPLAY)?,
                cursor: flag(OFFSET_CURSOR_ON)?,
                blink: flag(OFFSET_BLINK)?,
            },
            entry: EntryMode {
                direction: if flag(OFFSET_DIRECTION)? {
                    Direction::Right
                } else {
                    Direction::Left
                },
                shift: flag(OFFSET_SHIFT)?,
            },
            row2_full: flag(OFFSET_ROW2_FULL)?,
            shadow: ShadowBuffer::from_cells(cells),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snapshot {
        let mut snapshot = Snapshot::initial(0x27, Lines::Two, RomVariant::A02);
        snapshot.cursor = 0x45;
        snapshot.backlight = false;
        snapshot.control.blink = true;
        snapshot.entry = EntryMode {
            direction: Direction::Left,
            shift: true,
        };
        snapshot.row2_full = true;
        snapshot.shadow.set(Lines::Two, 0x40, b'Q');
        snapshot
    }

    #[test]
    fn test_layout() {
        let record = sample().to_bytes();
        assert_eq!(record.len(), 93);
        assert_eq!(
            &record[..HEADER_LEN],
            &[2, 0x27, 2, 1, 0x45, 0, 1, 0, 1, 0, 1, 0, 1]
        );
        assert_eq!(record[HEADER_LEN + 40], b'Q');
        assert_eq!(record[HEADER_LEN], b' ');
    }

    #[test]
    fn test_decode_restores_every_field() {
        let snapshot = sample();
        assert_eq!(Snapshot::from_bytes(&snapshot.to_bytes()), Ok(snapshot));
    }

    #[test]
    fn test_rejects_unknown_version() {
        let mut record = sample().to_bytes();
        record[0] = 9;
        assert_eq!(
            Snapshot::from_bytes(&record),
            Err(SnapshotError::UnsupportedVersion(9))
        );
    }

    #[test]
    fn test_rejects_bad_fields() {
        let mut record = sample().to_bytes();
        record[2] = 3;
        assert_eq!(
            Snapshot::from_bytes(&record),
            Err(SnapshotError::InvalidLines(3))
        );

        let mut record = sample().to_bytes();
        record[3] = 7;
        assert_eq!(
            Snapshot::from_bytes(&record),
            Err(SnapshotError::InvalidRom(7))
        );

        let mut record = sample().to_bytes();
        record[OFFSET_CURSOR_ON] = 2;
        assert_eq!(
            Snapshot::from_bytes(&record),
            Err(SnapshotError::InvalidFlag {
                offset: OFFSET_CURSOR_ON,
                value: 2
            })
        );

        let mut record = sample().to_bytes();
        record[OFFSET_ROW2_FULL] = 5;
        assert_eq!(
            Snapshot::from_bytes(&record),
            Err(SnapshotError::InvalidFlag {
                offset: OFFSET_ROW2_FULL,
                value: 5
            })
        );
    }

    #[test]
    fn test_rejects_cursor_in_row_gap() {
        let mut record = sample().to_bytes();
        record[4] = 0x30;
        assert_eq!(
            Snapshot::from_bytes(&record),
            Err(SnapshotError::InvalidCursor(0x30))
        );
    }
}
