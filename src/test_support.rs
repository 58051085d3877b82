//! Test doubles shared by the unit tests

use std::vec::Vec;

use crate::interface::BusInterface;
use crate::storage::{MemoryStore, SnapshotStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// Bus that records every byte and can be told to start failing
#[derive(Debug, Default)]
pub struct RecordingBus {
    pub written: Vec<u8>,
    /// Number of writes that succeed before every further write fails
    pub fail_after: Option<usize>,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(writes: usize) -> Self {
        Self {
            written: Vec::new(),
            fail_after: Some(writes),
        }
    }
}

impl BusInterface for RecordingBus {
    type Error = MockError;

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        if self.fail_after.is_some_and(|limit| self.written.len() >= limit) {
            return Err(MockError);
        }
        self.written.push(byte);
        Ok(())
    }
}

/// In-memory store whose saves can be switched to fail
#[derive(Debug, Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_saves: bool,
}

impl SnapshotStore for FlakyStore {
    type Error = MockError;

    fn load(&mut self, buf: &mut [u8]) -> Result<Option<usize>, Self::Error> {
        self.inner.load(buf).map_err(|_| MockError)
    }

    fn save(&mut self, record: &[u8]) -> Result<(), Self::Error> {
        if self.fail_saves {
            return Err(MockError);
        }
        self.inner.save(record).map_err(|_| MockError)
    }

    fn discard(&mut self) -> Result<(), Self::Error> {
        self.inner.discard().map_err(|_| MockError)
    }
}
