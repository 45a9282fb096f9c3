//! The order-reference counter.
//!
//! A single integer, seeded at [`SEED`] when nothing has been stored yet and
//! bumped once per submission attempt.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use atomicwrites::{AtomicFile, OverwriteBehavior};

pub const SEED: u64 = 3443;

#[derive(Debug, thiserror::Error)]
pub enum CounterError {
    #[error("counter file {path} is unreadable: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("counter file {path} could not be written: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("counter file {path} does not hold a number: {content:?}")]
    Corrupt { path: PathBuf, content: String },
}

pub trait OrderReferenceCounter {
    /// Current value, without changing it.
    fn read(&self) -> Result<u64, CounterError>;
    /// Adds one and returns the new value.
    fn increment_and_get(&self) -> Result<u64, CounterError>;
    /// Puts the counter back to [`SEED`].
    fn reset(&self) -> Result<(), CounterError>;
}

/// Counter held in memory, for tests and one-shot runs.
#[derive(Debug)]
pub struct InMemoryCounter {
    value: AtomicU64,
}

impl InMemoryCounter {
    pub fn new(value: u64) -> Self {
        Self {
            value: AtomicU64::new(value),
        }
    }
}

impl Default for InMemoryCounter {
    fn default() -> Self {
        Self::new(SEED)
    }
}

impl OrderReferenceCounter for InMemoryCounter {
    fn read(&self) -> Result<u64, CounterError> {
        Ok(self.value.load(Ordering::SeqCst))
    }

    fn increment_and_get(&self) -> Result<u64, CounterError> {
        Ok(self.value.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn reset(&self) -> Result<(), CounterError> {
        self.value.store(SEED, Ordering::SeqCst);
        Ok(())
    }
}

/// Counter persisted as decimal text in a single file.
#[derive(Debug, Clone)]
pub struct FileCounter {
    path: PathBuf,
}

impl FileCounter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<local data dir>/purchase-order-relay/order_counter`
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("purchase-order-relay").join("order_counter"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn store(&self, value: u64) -> Result<(), CounterError> {
        let write_err = |source| CounterError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        AtomicFile::new(&self.path, OverwriteBehavior::AllowOverwrite)
            .write(|f| {
                f.write_all(value.to_string().as_bytes())?;
                f.flush()
            })
            .map_err(|err| write_err(io::Error::from(err)))
    }
}

impl OrderReferenceCounter for FileCounter {
    fn read(&self) -> Result<u64, CounterError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(SEED),
            Err(source) => {
                return Err(CounterError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        content.trim().parse().map_err(|_| CounterError::Corrupt {
            path: self.path.clone(),
            content,
        })
    }

    fn increment_and_get(&self) -> Result<u64, CounterError> {
        let next = self.read()? + 1;
        self.store(next)?;
        Ok(next)
    }

    fn reset(&self) -> Result<(), CounterError> {
        self.store(SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::simple_types::ReferenceNumber;

    fn next_reference(counter: &impl OrderReferenceCounter) -> String {
        ReferenceNumber::new(counter.increment_and_get().unwrap()).to_string()
    }

    #[test]
    fn in_memory_counter_starts_at_seed() {
        let counter = InMemoryCounter::default();
        assert_eq!(counter.read().unwrap(), 3443);
        assert_eq!(next_reference(&counter), "00003444");
        assert_eq!(next_reference(&counter), "00003445");
        counter.reset().unwrap();
        assert_eq!(next_reference(&counter), "00003444");
    }

    #[test]
    fn file_counter_seeds_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let counter = FileCounter::new(dir.path().join("nested").join("order_counter"));
        assert_eq!(counter.read().unwrap(), SEED);
        assert!(!counter.path().exists());
    }

    #[test]
    fn file_counter_persists_and_resets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order_counter");

        assert_eq!(next_reference(&FileCounter::new(&path)), "00003444");
        assert_eq!(fs::read_to_string(&path).unwrap(), "3444");

        // a fresh handle sees the stored value
        let counter = FileCounter::new(&path);
        assert_eq!(counter.read().unwrap(), 3444);
        counter.reset().unwrap();
        assert_eq!(next_reference(&counter), "00003444");
    }

    #[test]
    fn file_counter_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order_counter");
        fs::write(&path, "not a number").unwrap();

        let err = FileCounter::new(&path).increment_and_get().unwrap_err();
        assert!(matches!(err, CounterError::Corrupt { .. }));
    }
}
