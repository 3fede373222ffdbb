//! Durable key-value persistence for the cart snapshot.
//!
//! The storefront keeps the serialized cart under a single fixed key,
//! [`CART_STORAGE_KEY`]. The [`SnapshotStore`] trait is the seam the store
//! actor writes through; [`JsonFileStore`] is the production
//! implementation (one JSON object file acting as a key-to-value map, in
//! the spirit of browser local storage) and [`MemoryStore`] backs tests
//! and ephemeral sessions.
//!
//! Reads and writes are synchronous and carry no partial-write protection;
//! a snapshot that fails to parse is surfaced loudly at load time.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

/// Fixed storage key for the serialized cart.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Errors that can occur reading or writing snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Filesystem access failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data does not parse.
    #[error("corrupt snapshot: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Durable key-value layer surviving restarts.
pub trait SnapshotStore: Send + 'static {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read or parsed.
    fn get(&self, key: &str) -> Result<Option<String>, SnapshotError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), SnapshotError>;
}

/// File-backed snapshot store.
///
/// Keeps all keys in one JSON object file. A missing file reads as empty;
/// a file that exists but does not parse is an error.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the file at `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, SnapshotError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl SnapshotStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SnapshotError> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        fs::write(&self.path, serde_json::to_string(&map)?)?;
        Ok(())
    }
}

/// In-memory snapshot store for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SnapshotError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.get(CART_STORAGE_KEY).expect("readable").is_none());
        store.set(CART_STORAGE_KEY, "[]").expect("writable");
        assert_eq!(
            store.get(CART_STORAGE_KEY).expect("readable").as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path().join("cart.json"));
        assert!(store.get(CART_STORAGE_KEY).expect("readable").is_none());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cart.json");

        let mut store = JsonFileStore::new(path.clone());
        store
            .set(CART_STORAGE_KEY, r#"[{"id":1,"amount":1}]"#)
            .expect("writable");
        drop(store);

        let reopened = JsonFileStore::new(path);
        assert_eq!(
            reopened.get(CART_STORAGE_KEY).expect("readable").as_deref(),
            Some(r#"[{"id":1,"amount":1}]"#)
        );
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = JsonFileStore::new(dir.path().join("cart.json"));
        store.set("other", "1").expect("writable");
        store.set(CART_STORAGE_KEY, "[]").expect("writable");
        assert_eq!(store.get("other").expect("readable").as_deref(), Some("1"));
    }

    #[test]
    fn test_file_store_rejects_garbage_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cart.json");
        fs::write(&path, "not json").expect("writable");
        let store = JsonFileStore::new(path);
        assert!(matches!(
            store.get(CART_STORAGE_KEY),
            Err(SnapshotError::Corrupt(_))
        ));
    }
}
