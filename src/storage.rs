//! Durable storage for the display state record
//!
//! The controller cannot be read back over the backpack, so the driver keeps
//! the last state it wrote in a [`Snapshot`](crate::snapshot::Snapshot) and
//! hands the encoded record to a [`SnapshotStore`] after every operation.
//! A later process can then reopen the display without re-initializing it.
//!
//! Two stores are provided:
//!
//! - [`MemoryStore`]: keeps the record in RAM (always available)
//! - [`FileStore`]: keeps the record in a file (requires the `std` feature)
//!
//! ## Example
//!
//! ```
//! use hd44780_i2c::{MemoryStore, SnapshotStore};
//!
//! let mut store = MemoryStore::new();
//! let mut buf = [0u8; 4];
//! assert_eq!(store.load(&mut buf), Ok(None));
//!
//! assert!(store.save(&[1, 2, 3]).is_ok());
//! assert_eq!(store.load(&mut buf), Ok(Some(3)));
//! assert_eq!(&buf[..3], &[1, 2, 3]);
//! ```

use core::fmt::Debug;

use crate::snapshot::SNAPSHOT_LEN;

/// Trait for durable storage of the encoded state record
///
/// Reads and writes are whole-record operations.
pub trait SnapshotStore {
    /// Error type for storage operations
    type Error: Debug;

    /// Read the stored record into `buf`
    ///
    /// Returns `Ok(None)` when no record exists, otherwise the number of
    /// bytes read. A record longer than `buf` is read up to `buf.len()`.
    fn load(&mut self, buf: &mut [u8]) -> Result<Option<usize>, Self::Error>;

    /// Replace the stored record with `record`
    fn save(&mut self, record: &[u8]) -> Result<(), Self::Error>;

    /// Remove the stored record, if any
    fn discard(&mut self) -> Result<(), Self::Error>;
}

impl<T: SnapshotStore + ?Sized> SnapshotStore for &mut T {
    type Error = T::Error;

    fn load(&mut self, buf: &mut [u8]) -> Result<Option<usize>, Self::Error> {
        T::load(self, buf)
    }

    fn save(&mut self, record: &[u8]) -> Result<(), Self::Error> {
        T::save(self, record)
    }

    fn discard(&mut self) -> Result<(), Self::Error> {
        T::discard(self)
    }
}

/// Errors from [`MemoryStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryStoreError {
    /// Record larger than a snapshot
    Capacity {
        /// Size of the rejected record
        len: usize,
    },
}

/// In-memory [`SnapshotStore`]
///
/// Holds at most one snapshot-sized record. Useful for hosts without
/// persistent storage and for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    record: Option<heapless::Vec<u8, SNAPSHOT_LEN>>,
    saves: usize,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `record`
    ///
    /// # Errors
    ///
    /// Returns `MemoryStoreError::Capacity` if `record` is larger than a snapshot.
    pub fn with_record(record: &[u8]) -> Result<Self, MemoryStoreError> {
        let mut store = Self::new();
        store.put(record)?;
        Ok(store)
    }

    /// The stored record, if any
    pub fn record(&self) -> Option<&[u8]> {
        self.record.as_deref()
    }

    /// Number of successful [`SnapshotStore::save`] calls
    pub fn save_count(&self) -> usize {
        self.saves
    }

    fn put(&mut self, record: &[u8]) -> Result<(), MemoryStoreError> {
        let stored = heapless::Vec::from_slice(record)
            .map_err(|()| MemoryStoreError::Capacity { len: record.len() })?;
        self.record = Some(stored);
        Ok(())
    }
}

impl SnapshotStore for MemoryStore {
    type Error = MemoryStoreError;

    fn load(&mut self, buf: &mut [u8]) -> Result<Option<usize>, Self::Error> {
        Ok(self.record.as_ref().map(|record| {
            let n = record.len().min(buf.len());
            buf[..n].copy_from_slice(&record[..n]);
            n
        }))
    }

    fn save(&mut self, record: &[u8]) -> Result<(), Self::Error> {
        self.put(record)?;
        self.saves += 1;
        Ok(())
    }

    fn discard(&mut self) -> Result<(), Self::Error> {
        self.record = None;
        Ok(())
    }
}

#[cfg(feature = "std")]
pub use file::FileStore;

#[cfg(feature = "std")]
mod file {
    use std::fs::{self, File};
    use std::io::{self, ErrorKind, Read, Write};
    use std::path::{Path, PathBuf};

    use super::SnapshotStore;

    /// File-backed [`SnapshotStore`]
    ///
    /// Every save writes the full record to a sibling `.tmp` file, syncs it
    /// and renames it over the target, so a failed or interrupted save leaves
    /// the previous record in place.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        /// Create a store backed by the file at `path`
        ///
        /// The file is not touched until the first load or save.
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// Path of the backing file
        pub fn path(&self) -> &Path {
            &self.path
        }

        /// Path of the staging file used while saving
        pub fn staging_path(&self) -> PathBuf {
            let mut staging = self.path.clone().into_os_string();
            staging.push(".tmp");
            PathBuf::from(staging)
        }

        fn write_staged(staging: &Path, record: &[u8]) -> io::Result<()> {
            let mut file = File::create(staging)?;
            file.write_all(record)?;
            file.sync_all()
        }
    }

    impl SnapshotStore for FileStore {
        type Error = io::Error;

        fn load(&mut self, buf: &mut [u8]) -> Result<Option<usize>, Self::Error> {
            let mut file = match File::open(&self.path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
                Err(e) => return Err(e),
            };
            let mut filled = 0;
            while filled < buf.len() {
                match file.read(&mut buf[filled..]) {
                    Ok(0) => break,
                    Ok(n) => filled += n,
                    Err(e) if e.kind() == ErrorKind::Interrupted => {}
                    Err(e) => return Err(e),
                }
            }
            Ok(Some(filled))
        }

        fn save(&mut self, record: &[u8]) -> Result<(), Self::Error> {
            let staging = self.staging_path();
            let result = Self::write_staged(&staging, record)
                .and_then(|()| fs::rename(&staging, &self.path));
            if result.is_err() {
                let _ = fs::remove_file(&staging);
            }
            result
        }

        fn discard(&mut self) -> Result<(), Self::Error> {
            match fs::remove_file(&self.path) {
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                other => other,
            }
        }
    }
}
