#![forbid(unsafe_code)]

//! Key-value preference storage seam.
//!
//! Browsers expose `localStorage` as a synchronous API that may throw at any
//! point (privacy mode, quota, sandboxed iframes). [`PreferenceStore`] turns
//! those failures into [`StorageError`] values so controllers can degrade to
//! "absent" on read and "discarded" on write while tests still observe the
//! failure path.

use std::collections::HashMap;
use std::fmt;

/// Failure reported by a [`PreferenceStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The storage backend could not be obtained at all.
    Unavailable,
    /// Reading a key failed.
    Read(String),
    /// Writing a key failed (quota exceeded, storage disabled, ...).
    Write(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "preference storage unavailable"),
            Self::Read(reason) => write!(f, "preference read failed: {reason}"),
            Self::Write(reason) => write!(f, "preference write failed: {reason}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Synchronous key-value store for user preferences.
pub trait PreferenceStore {
    /// Read `key`. `Ok(None)` means the key is absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store for hosts without persistent storage.
///
/// A store built with [`MemoryStore::unavailable`] fails every access, which
/// mirrors a browser with storage disabled.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryStore {
    /// Empty, working store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects every read and write.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            entries: HashMap::new(),
            unavailable: true,
        }
    }

    /// Store pre-seeded with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_owned(), value.to_owned());
        store
    }

    /// Raw entry lookup, bypassing availability.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_reads_as_none() {
        let store = MemoryStore::new();
        assert_eq!(store.read("theme"), Ok(None));
    }

    #[test]
    fn write_then_read() {
        let mut store = MemoryStore::new();
        store.write("theme", "aurora").unwrap();
        assert_eq!(store.read("theme"), Ok(Some("aurora".to_owned())));
        assert_eq!(store.get("theme"), Some("aurora"));
    }

    #[test]
    fn unavailable_store_fails_both_directions() {
        let mut store = MemoryStore::unavailable();
        assert_eq!(store.read("theme"), Err(StorageError::Unavailable));
        assert_eq!(
            store.write("theme", "aurora"),
            Err(StorageError::Unavailable)
        );
        assert_eq!(store.get("theme"), None);
    }

    #[test]
    fn errors_render_reason() {
        let err = StorageError::Write("QuotaExceededError".to_owned());
        assert_eq!(
            err.to_string(),
            "preference write failed: QuotaExceededError"
        );
    }
}
