//! Durable key-value storage
//!
//! The cart, the pending checkout snapshot and the order history are each kept
//! as one JSON document under a fixed key. Anything that can get, set and remove
//! strings by key can back them.

use std::{io, sync::Arc};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing the value would exceed the store's byte quota.
    #[error("storage quota exceeded writing {key}: {needed} bytes needed, {quota} byte quota")]
    QuotaExceeded {
        /// Key being written
        key: String,

        /// Bytes the store would hold after the write
        needed: usize,

        /// Configured quota in bytes
        quota: usize,
    },

    /// The key cannot be mapped onto the backing medium.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A previous writer panicked while holding the store lock.
    #[error("storage lock poisoned")]
    Poisoned,

    /// Filesystem error.
    #[error("storage io error: {0}")]
    Io(#[from] io::Error),

    /// Value could not be encoded or decoded.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Synchronous string key-value store.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the write is rejected or fails.
    fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Delete the value under `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Read and decode the JSON document stored under `key`.
///
/// # Errors
///
/// Returns a [`StorageError`] if the read fails or the document does not decode.
pub fn read_json<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    store
        .get(key)?
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(StorageError::from)
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns a [`StorageError`] if encoding or the write fails.
pub fn write_json<T: Serialize + ?Sized>(
    store: &impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;

    store.set(key, raw)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        body: String,
    }

    #[test]
    fn json_documents_round_trip() -> TestResult {
        let store = MemoryStore::new();
        let note = Note {
            body: "hello".to_string(),
        };

        write_json(&store, "note", &note)?;

        assert_eq!(read_json::<Note>(&store, "note")?, Some(note));

        Ok(())
    }

    #[test]
    fn missing_document_reads_as_none() -> TestResult {
        let store = MemoryStore::new();

        assert_eq!(read_json::<Note>(&store, "note")?, None);

        Ok(())
    }

    #[test]
    fn malformed_document_is_a_serialization_error() -> TestResult {
        let store = MemoryStore::new();
        store.set("note", "{not json".to_string())?;

        let result = read_json::<Note>(&store, "note");

        assert!(
            matches!(result, Err(StorageError::Serialization(_))),
            "expected Serialization, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn shared_handles_see_the_same_entries() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let other = Arc::clone(&store);

        store.set("key", "value".to_string())?;

        assert_eq!(other.get("key")?, Some("value".to_string()));

        Ok(())
    }
}
