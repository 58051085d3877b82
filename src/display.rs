//! Core display operations

use log::{debug, warn};

use crate::address::{self, CursorRef, ROW2_END};
use crate::charset::RomVariant;
use crate::command::{
    BACKLIGHT_OFF, BACKLIGHT_ON, CLEAR_DISPLAY, FOUR_BIT_SWITCH_NIBBLE, cursor_shift,
    display_shift, function_set, set_ddram_address,
};
use crate::config::{Config, Lines};
use crate::encoder::{Register, encode, encode_nibble, transmit};
use crate::error::Error;
use crate::interface::BusInterface;
use crate::shadow::Row;
use crate::snapshot::{SNAPSHOT_LEN, Snapshot};
use crate::state::{Direction, DisplayControl, EntryMode};
use crate::storage::SnapshotStore;

pub(crate) type DisplayResult<I, S> = core::result::Result<(), Error<I, S>>;

/// Driver for an HD44780 behind a 4-bit I2C backpack
///
/// The controller cannot be read back, so every setting the driver has
/// written lives in a [`Snapshot`] that is handed to the [`SnapshotStore`]
/// after each operation. Opening a display with a stored snapshot resumes
/// from it without touching the hardware.
///
/// A `Display` owns its bus and store. Dropping it, or calling
/// [`release()`](Self::release), sends nothing to the controller.
pub struct Display<I, S>
where
    I: BusInterface,
    S: SnapshotStore,
{
    /// Byte transport to the backpack
    pub(crate) interface: I,
    /// Durable home of the snapshot
    pub(crate) store: S,
    /// Everything written to the controller so far
    pub(crate) state: Snapshot,
}

impl<I, S> Display<I, S>
where
    I: BusInterface,
    S: SnapshotStore,
{
    /// Open the display described by `config`
    ///
    /// If `store` holds a snapshot, the display resumes from it and no bytes
    /// are sent. Line mode and ROM come from the snapshot in that case.
    /// Otherwise the controller is initialized and a fresh snapshot saved.
    ///
    /// # Errors
    ///
    /// - `Error::ShortSnapshot` / `Error::Snapshot` if the stored record is unusable
    /// - `Error::AddressMismatch` if the record belongs to another address;
    ///   the record is left untouched
    /// - `Error::Transport` if initialization fails; any stored record is discarded
    /// - `Error::Storage` if the store cannot be read or written
    pub fn open(interface: I, mut store: S, config: Config) -> Result<Self, Error<I, S>> {
        let mut record = [0u8; SNAPSHOT_LEN];
        match store.load(&mut record).map_err(Error::Storage)? {
            Some(read) => {
                if read < SNAPSHOT_LEN {
                    return Err(Error::ShortSnapshot {
                        expected: SNAPSHOT_LEN,
                        read,
                    });
                }
                let state = Snapshot::from_bytes(&record).map_err(Error::Snapshot)?;
                if state.address != config.address {
                    return Err(Error::AddressMismatch {
                        stored: state.address,
                        requested: config.address,
                    });
                }
                if state.lines != config.lines || state.rom != config.rom {
                    debug!(
                        "snapshot for {:#04x} overrides configured {:?}/{:?} with {:?}/{:?}",
                        config.address, config.lines, config.rom, state.lines, state.rom
                    );
                }
                debug!(
                    "resumed display {:#04x} at cursor {:#04x}",
                    state.address, state.cursor
                );
                Ok(Self {
                    interface,
                    store,
                    state,
                })
            }
            None => {
                let mut display = Self {
                    interface,
                    store,
                    state: Snapshot::initial(config.address, config.lines, config.rom),
                };
                if let Err(e) = display.init() {
                    if let Err(discard) = display.store.discard() {
                        warn!("could not discard snapshot after failed init: {:?}", discard);
                    }
                    return Err(e);
                }
                display.save()?;
                debug!(
                    "initialized display {:#04x} ({:?})",
                    config.address, config.lines
                );
                Ok(display)
            }
        }
    }

    /// Run the power-on sequence for 4-bit operation
    fn init(&mut self) -> DisplayResult<I, S> {
        let switch = encode_nibble(Register::Command, FOUR_BIT_SWITCH_NIBBLE, true);
        transmit(&mut self.interface, &switch).map_err(Error::Transport)?;

        self.send_command(function_set(self.state.lines))?;
        self.send_command(self.state.entry.instruction())?;
        self.send_command(self.state.control.instruction())?;
        self.send_command(CLEAR_DISPLAY)?;

        self.interface
            .write_byte(BACKLIGHT_ON)
            .map_err(Error::Transport)
    }

    /// Give back the bus and the store
    ///
    /// Nothing is sent to the controller; the last saved snapshot stays valid.
    pub fn release(self) -> (I, S) {
        (self.interface, self.store)
    }

    /// Clear DDRAM and return the cursor to address 0
    pub fn clear(&mut self) -> DisplayResult<I, S> {
        let result = self.clear_ddram();
        self.settle(result)
    }

    /// Switch the backlight on or off
    ///
    /// Every byte sent afterwards carries the new backlight bit.
    pub fn set_backlight(&mut self, on: bool) -> DisplayResult<I, S> {
        if self.state.backlight == on {
            return Ok(());
        }
        let byte = if on { BACKLIGHT_ON } else { BACKLIGHT_OFF };
        let result = self.interface.write_byte(byte).map_err(Error::Transport);
        if result.is_ok() {
            self.state.backlight = on;
        }
        self.settle(result)
    }

    /// Show or hide the DDRAM contents
    pub fn set_display(&mut self, on: bool) -> DisplayResult<I, S> {
        self.update_control(DisplayControl {
            display: on,
            ..self.state.control
        })
    }

    /// Show or hide the underline cursor
    pub fn set_cursor(&mut self, on: bool) -> DisplayResult<I, S> {
        self.update_control(DisplayControl {
            cursor: on,
            ..self.state.control
        })
    }

    /// Enable or disable the blinking block cursor
    pub fn set_blink(&mut self, on: bool) -> DisplayResult<I, S> {
        self.update_control(DisplayControl {
            blink: on,
            ..self.state.control
        })
    }

    /// Set the cursor direction and display shift applied after each character
    pub fn set_entry_mode(&mut self, direction: Direction, shift: bool) -> DisplayResult<I, S> {
        let entry = EntryMode { direction, shift };
        if entry == self.state.entry {
            return Ok(());
        }
        let result = self.send_command(entry.instruction());
        if result.is_ok() {
            self.state.entry = entry;
        }
        self.settle(result)
    }

    /// Move the cursor to `offset` cells from `reference`
    ///
    /// The target wraps through the address space of the line mode, so any
    /// offset lands on a valid address.
    pub fn seek_cursor(&mut self, reference: CursorRef, offset: i32) -> DisplayResult<I, S> {
        let target = address::resolve(self.state.lines, reference, self.state.cursor, offset);
        let result = self.move_cursor(target);
        self.settle(result)
    }

    /// Move the cursor one cell without writing
    pub fn shift_cursor(&mut self, direction: Direction) -> DisplayResult<I, S> {
        let result = self.send_command(cursor_shift(direction));
        if result.is_ok() {
            self.state.cursor =
                address::shift(self.state.lines, self.state.cursor, direction.step());
            self.state.row2_full = false;
        }
        self.settle(result)
    }

    /// Scroll the whole display one cell
    ///
    /// DDRAM and the cursor address are unchanged.
    pub fn shift_display(&mut self, direction: Direction) -> DisplayResult<I, S> {
        let result = self.send_command(display_shift(direction));
        self.settle(result)
    }

    /// Backlight state
    pub fn backlight(&self) -> bool {
        self.state.backlight
    }

    /// Whether DDRAM contents are shown
    pub fn display_on(&self) -> bool {
        self.state.control.display
    }

    /// Whether the underline cursor is shown
    pub fn cursor_on(&self) -> bool {
        self.state.control.cursor
    }

    /// Whether the block cursor blinks
    pub fn blink_on(&self) -> bool {
        self.state.control.blink
    }

    /// Current entry mode
    pub fn entry_mode(&self) -> EntryMode {
        self.state.entry
    }

    /// Current DDRAM address
    pub fn cursor_address(&self) -> u8 {
        self.state.cursor
    }

    /// Line mode
    pub fn lines(&self) -> Lines {
        self.state.lines
    }

    /// Character ROM
    pub fn rom(&self) -> RomVariant {
        self.state.rom
    }

    /// I2C address of the backpack
    pub fn address(&self) -> u8 {
        self.state.address
    }

    /// ROM codes last written to one row
    pub fn row(&self, row: Row) -> &[u8] {
        self.state.shadow.row(self.state.lines, row)
    }

    fn update_control(&mut self, control: DisplayControl) -> DisplayResult<I, S> {
        if control == self.state.control {
            return Ok(());
        }
        let result = self.write_control(control);
        self.settle(result)
    }

    /// Send a display control instruction unconditionally
    pub(crate) fn write_control(&mut self, control: DisplayControl) -> DisplayResult<I, S> {
        self.send_command(control.instruction())?;
        self.state.control = control;
        Ok(())
    }

    pub(crate) fn clear_ddram(&mut self) -> DisplayResult<I, S> {
        self.send_command(CLEAR_DISPLAY)?;
        self.state.cursor = 0;
        self.state.row2_full = false;
        self.state.shadow.clear();
        Ok(())
    }

    pub(crate) fn move_cursor(&mut self, target: u8) -> DisplayResult<I, S> {
        self.send_command(set_ddram_address(target))?;
        self.state.cursor = target;
        self.state.row2_full = false;
        Ok(())
    }

    /// Write one ROM code at the cursor and advance it
    ///
    /// Filling the last cell of row 2 while moving right wraps the cursor to
    /// row 1 and marks row 2 as full.
    pub(crate) fn write_code(&mut self, code: u8) -> DisplayResult<I, S> {
        self.send_data(code)?;
        let lines = self.state.lines;
        let written_at = self.state.cursor;
        let direction = self.state.entry.direction;
        self.state.shadow.set(lines, written_at, code);
        self.state.cursor = address::shift(lines, written_at, direction.step());
        self.state.row2_full =
            lines == Lines::Two && written_at == ROW2_END && direction == Direction::Right;
        Ok(())
    }

    fn send_command(&mut self, command: u8) -> DisplayResult<I, S> {
        let bytes = encode(Register::Command, command, self.state.backlight);
        transmit(&mut self.interface, &bytes).map_err(Error::Transport)
    }

    fn send_data(&mut self, code: u8) -> DisplayResult<I, S> {
        let bytes = encode(Register::Data, code, self.state.backlight);
        transmit(&mut self.interface, &bytes).map_err(Error::Transport)
    }

    fn save(&mut self) -> DisplayResult<I, S> {
        self.store
            .save(&self.state.to_bytes())
            .map_err(Error::Storage)
    }

    /// Persist after an attempted operation and pick the error to report
    ///
    /// An operation error takes precedence over a storage error.
    pub(crate) fn settle(&mut self, result: DisplayResult<I, S>) -> DisplayResult<I, S> {
        let saved = self.save();
        match (result, saved) {
            (Ok(()), saved) => saved,
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(storage)) => {
                warn!("snapshot not saved after failed operation: {:?}", storage);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::ROW2_START;
    use crate::config::Builder;
    use crate::storage::MemoryStore;
    use crate::test_support::{FlakyStore, MockError, RecordingBus};
    use std::vec::Vec;

    const TWO_LINE_INIT: [u8; 19] = [
        0x2C, 0x28, 0x2C, 0x28, 0x8C, 0x88, 0x0C, 0x08, 0x6C, 0x68, 0x0C, 0x08, 0xCC, 0xC8, 0x0C,
        0x08, 0x1C, 0x18, 0x08,
    ];

    fn config(lines: Lines) -> Config {
        Builder::new()
            .address(0x27)
            .lines(lines)
            .build()
            .unwrap()
    }

    fn open_fresh(lines: Lines) -> Display<RecordingBus, MemoryStore> {
        let mut display = Display::open(RecordingBus::new(), MemoryStore::new(), config(lines))
            .unwrap();
        display.interface.written.clear();
        display
    }

    #[test]
    fn test_two_line_init_sequence() {
        let mut store = MemoryStore::new();
        let display = Display::open(RecordingBus::new(), &mut store, config(Lines::Two)).unwrap();

        assert_eq!(display.interface.written, TWO_LINE_INIT);
        assert!(display.backlight());
        assert!(display.display_on());
        assert!(!display.cursor_on());
        assert!(!display.blink_on());
        assert_eq!(display.entry_mode(), EntryMode::default());
        assert_eq!(display.cursor_address(), 0);
        drop(display);
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.record().map(<[u8]>::len), Some(SNAPSHOT_LEN));
    }

    #[test]
    fn test_one_line_init_uses_one_line_function_set() {
        let display =
            Display::open(RecordingBus::new(), MemoryStore::new(), config(Lines::One)).unwrap();
        assert_eq!(&display.interface.written[2..6], &[0x2C, 0x28, 0x0C, 0x08]);
        assert_eq!(display.interface.written.len(), TWO_LINE_INIT.len());
    }

    #[test]
    fn test_init_over_i2c() {
        use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

        let expectations: Vec<I2cTransaction> = TWO_LINE_INIT
            .iter()
            .map(|byte| I2cTransaction::write(0x27, std::vec![*byte]))
            .collect();
        let interface = crate::interface::Interface::new(I2cMock::new(&expectations), 0x27);

        let display = Display::open(interface, MemoryStore::new(), config(Lines::Two)).unwrap();
        let (interface, _) = display.release();
        interface.release().done();
    }

    #[test]
    fn test_resume_sends_nothing() {
        let mut display = open_fresh(Lines::Two);
        display.set_cursor(true).unwrap();
        display.seek_cursor(CursorRef::Line2Start, 2).unwrap();
        display.put_char('x').unwrap();
        let (_, store) = display.release();

        let resumed = Display::open(RecordingBus::new(), store, config(Lines::Two)).unwrap();
        assert!(resumed.interface.written.is_empty());
        assert!(resumed.cursor_on());
        assert_eq!(resumed.cursor_address(), 0x43);
        assert_eq!(resumed.row(Row::Second)[2], b'x');
    }

    #[test]
    fn test_address_mismatch_leaves_record() {
        let mut store = MemoryStore::new();
        drop(Display::open(RecordingBus::new(), &mut store, config(Lines::Two)).unwrap());
        let before = store.record().map(<[u8]>::to_vec);

        let other = Builder::new().address(0x3F).build().unwrap();
        let result = Display::open(RecordingBus::new(), &mut store, other);
        assert!(matches!(
            result,
            Err(Error::AddressMismatch {
                stored: 0x27,
                requested: 0x3F
            })
        ));
        drop(result);
        assert_eq!(store.record().map(<[u8]>::to_vec), before);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_short_snapshot() {
        let store = MemoryStore::with_record(&[1, 0x27, 2]).unwrap();
        let result = Display::open(RecordingBus::new(), store, config(Lines::Two));
        assert!(matches!(
            result,
            Err(Error::ShortSnapshot {
                expected: SNAPSHOT_LEN,
                read: 3
            })
        ));
    }

    #[test]
    fn test_corrupt_snapshot() {
        let mut record = Snapshot::initial(0x27, Lines::Two, RomVariant::A00).to_bytes();
        record[5] = 7;
        let store = MemoryStore::with_record(&record).unwrap();
        let result = Display::open(RecordingBus::new(), store, config(Lines::Two));
        assert!(matches!(result, Err(Error::Snapshot(_))));
    }

    #[test]
    fn test_failed_init_discards_store() {
        let mut store = MemoryStore::new();
        let result = Display::open(RecordingBus::failing_after(5), &mut store, config(Lines::Two));
        assert!(matches!(result, Err(Error::Transport(MockError))));
        drop(result);
        assert_eq!(store.record(), None);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_repeated_toggle_sends_nothing() {
        let mut display = open_fresh(Lines::Two);
        let saves = display.store.save_count();

        display.set_backlight(true).unwrap();
        display.set_display(true).unwrap();
        display.set_cursor(false).unwrap();
        display.set_blink(false).unwrap();
        display.set_entry_mode(Direction::Right, false).unwrap();

        assert!(display.interface.written.is_empty());
        assert_eq!(display.store.save_count(), saves);
    }

    #[test]
    fn test_display_control_keeps_other_flags() {
        let mut display = open_fresh(Lines::Two);

        display.set_cursor(true).unwrap();
        assert_eq!(display.interface.written, [0x0C, 0x08, 0xEC, 0xE8]);

        display.interface.written.clear();
        display.set_blink(true).unwrap();
        assert_eq!(display.interface.written, [0x0C, 0x08, 0xFC, 0xF8]);

        display.interface.written.clear();
        display.set_display(false).unwrap();
        assert_eq!(display.interface.written, [0x0C, 0x08, 0xBC, 0xB8]);
        assert!(display.cursor_on());
        assert!(display.blink_on());
    }

    #[test]
    fn test_backlight_bit_follows_state() {
        let mut display = open_fresh(Lines::Two);

        display.set_backlight(false).unwrap();
        assert_eq!(display.interface.written, [0x00]);

        display.interface.written.clear();
        display.set_cursor(true).unwrap();
        assert_eq!(display.interface.written, [0x04, 0x00, 0xE4, 0xE0]);
        assert!(!display.backlight());
    }

    #[test]
    fn test_entry_mode() {
        let mut display = open_fresh(Lines::Two);
        display.set_entry_mode(Direction::Left, true).unwrap();
        // 0x05: decrement with display shift
        assert_eq!(display.interface.written, [0x0C, 0x08, 0x5C, 0x58]);
        assert_eq!(
            display.entry_mode(),
            EntryMode {
                direction: Direction::Left,
                shift: true
            }
        );
    }

    #[test]
    fn test_failed_write_keeps_state_and_persists() {
        let mut display = open_fresh(Lines::Two);
        let saves = display.store.save_count();
        display.interface.fail_after = Some(1);

        let result = display.set_cursor(true);
        assert!(matches!(result, Err(Error::Transport(MockError))));
        assert!(!display.cursor_on());
        assert_eq!(display.store.save_count(), saves + 1);

        let result = display.set_backlight(false);
        assert!(result.is_err());
        assert!(display.backlight());
    }

    #[test]
    fn test_storage_failure_is_reported() {
        let mut display =
            Display::open(RecordingBus::new(), FlakyStore::default(), config(Lines::Two)).unwrap();
        display.store.fail_saves = true;

        let result = display.set_cursor(true);
        assert!(matches!(result, Err(Error::Storage(MockError))));
        assert!(display.cursor_on());
    }

    #[test]
    fn test_transport_error_wins_over_storage_error() {
        let mut display =
            Display::open(RecordingBus::new(), FlakyStore::default(), config(Lines::Two)).unwrap();
        display.store.fail_saves = true;
        display.interface.fail_after = Some(0);

        let result = display.clear();
        assert!(matches!(result, Err(Error::Transport(MockError))));
    }

    #[test]
    fn test_clear() {
        let mut display = open_fresh(Lines::Two);
        display.put_char('a').unwrap();
        display.interface.written.clear();

        display.clear().unwrap();
        assert_eq!(display.interface.written, [0x0C, 0x08, 0x1C, 0x18]);
        assert_eq!(display.cursor_address(), 0);
        assert_eq!(display.row(Row::First)[0], b' ');
    }

    #[test]
    fn test_seek_cursor() {
        let mut display = open_fresh(Lines::Two);

        display.seek_cursor(CursorRef::Line2Start, 3).unwrap();
        assert_eq!(display.interface.written, [0xCC, 0xC8, 0x3C, 0x38]);
        assert_eq!(display.cursor_address(), 0x43);

        display.seek_cursor(CursorRef::Line1End, 1).unwrap();
        assert_eq!(display.cursor_address(), ROW2_START);

        display.seek_cursor(CursorRef::Current, -1).unwrap();
        assert_eq!(display.cursor_address(), 0x27);
    }

    #[test]
    fn test_failed_seek_keeps_cursor() {
        let mut display = open_fresh(Lines::Two);
        display.interface.fail_after = Some(2);
        assert!(display.seek_cursor(CursorRef::Line2End, 0).is_err());
        assert_eq!(display.cursor_address(), 0);
    }

    #[test]
    fn test_seek_line2_in_one_line_mode() {
        let mut display = open_fresh(Lines::One);
        display.seek_cursor(CursorRef::Line2End, 0).unwrap();
        assert_eq!(display.cursor_address(), 0x4F);
        display.seek_cursor(CursorRef::Line2Start, -1).unwrap();
        assert_eq!(display.cursor_address(), 0x4F);
    }

    #[test]
    fn test_shift_cursor_wraps_between_rows() {
        let mut display = open_fresh(Lines::Two);

        display.shift_cursor(Direction::Left).unwrap();
        assert_eq!(display.interface.written, [0x1C, 0x18, 0x0C, 0x08]);
        assert_eq!(display.cursor_address(), 0x67);

        display.shift_cursor(Direction::Right).unwrap();
        assert_eq!(display.cursor_address(), 0x00);
    }

    #[test]
    fn test_shift_display_keeps_cursor() {
        let mut display = open_fresh(Lines::Two);
        display.shift_display(Direction::Right).unwrap();
        assert_eq!(display.interface.written, [0x1C, 0x18, 0xCC, 0xC8]);
        assert_eq!(display.cursor_address(), 0);
    }

    #[test]
    fn test_getters_reflect_config() {
        let config = Builder::new()
            .address(0x3F)
            .lines(Lines::One)
            .rom(RomVariant::A02)
            .build()
            .unwrap();
        let display = Display::open(RecordingBus::new(), MemoryStore::new(), config).unwrap();
        assert_eq!(display.address(), 0x3F);
        assert_eq!(display.lines(), Lines::One);
        assert_eq!(display.rom(), RomVariant::A02);
        assert_eq!(display.row(Row::First).len(), 80);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_resume_from_file() {
        use crate::storage::FileStore;

        let mut path = std::env::temp_dir();
        path.push(std::format!("hd44780-i2c-display-{}.state", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let mut display =
            Display::open(RecordingBus::new(), FileStore::new(&path), config(Lines::Two)).unwrap();
        display.put_char('H').unwrap();
        display.set_backlight(false).unwrap();
        drop(display);

        let resumed =
            Display::open(RecordingBus::new(), FileStore::new(&path), config(Lines::Two))
                .unwrap();
        assert!(resumed.interface.written.is_empty());
        assert_eq!(resumed.cursor_address(), 1);
        assert!(!resumed.backlight());
        assert_eq!(resumed.row(Row::First)[0], b'H');

        let (_, mut store) = resumed.release();
        store.discard().unwrap();
    }
}
