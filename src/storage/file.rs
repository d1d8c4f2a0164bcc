//! File-backed store

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{KeyValueStore, StorageError};

/// Store keeping one `<key>.json` file per key inside a directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never observes a half-written document.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    quota: Option<u64>,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError::Io`] if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();

        fs::create_dir_all(&root)?;

        debug!(root = %root.display(), "opened file store");

        Ok(Self { root, quota: None })
    }

    /// Reject writes that would grow the stored documents beyond `quota` bytes.
    #[must_use]
    pub fn with_quota(mut self, quota: u64) -> Self {
        self.quota = Some(quota);
        self
    }

    /// Directory holding the stored documents.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.root.join(format!("{key}.json")))
    }

    /// Bytes held by every stored document other than `skip`.
    fn usage_excluding(&self, skip: &Path) -> Result<u64, StorageError> {
        let mut total = 0;

        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();

            if path == skip || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }

            total += fs::metadata(&path)?.len();
        }

        Ok(total)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        if let Some(quota) = self.quota {
            let value_len = u64::try_from(value.len()).unwrap_or(u64::MAX);
            let needed = self.usage_excluding(&path)?.saturating_add(value_len);

            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed: usize::try_from(needed).unwrap_or(usize::MAX),
                    quota: usize::try_from(quota).unwrap_or(usize::MAX),
                });
            }
        }

        let staging = path.with_extension("json.tmp");

        if let Err(err) = fs::write(&staging, value).and_then(|()| fs::rename(&staging, &path)) {
            _ = fs::remove_file(&staging);

            return Err(err.into());
        }

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn open_creates_missing_directory() -> TestResult {
        let dir = tempfile::tempdir()?;
        let root = dir.path().join("nested").join("data");

        let store = FileStore::open(&root)?;

        assert!(store.root().is_dir());

        Ok(())
    }

    #[test]
    fn values_survive_reopening() -> TestResult {
        let dir = tempfile::tempdir()?;

        FileStore::open(dir.path())?.set("decornest-cart", "[]".to_string())?;

        let reopened = FileStore::open(dir.path())?;

        assert_eq!(reopened.get("decornest-cart")?, Some("[]".to_string()));
        assert!(dir.path().join("decornest-cart.json").is_file());

        Ok(())
    }

    #[test]
    fn missing_key_reads_as_none_and_removes_cleanly() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::open(dir.path())?;

        assert_eq!(store.get("absent")?, None);
        store.remove("absent")?;

        Ok(())
    }

    #[test]
    fn remove_deletes_the_document() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::open(dir.path())?;

        store.set("orders", "[]".to_string())?;
        store.remove("orders")?;

        assert_eq!(store.get("orders")?, None);

        Ok(())
    }

    #[test]
    fn quota_counts_other_documents() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::open(dir.path())?.with_quota(10);

        store.set("a", "123456".to_string())?;
        store.set("a", "1234567890".to_string())?;

        let result = store.set("b", "1".to_string());

        assert!(
            matches!(result, Err(StorageError::QuotaExceeded { needed: 11, quota: 10, .. })),
            "expected QuotaExceeded, got {result:?}"
        );
        assert_eq!(store.get("b")?, None);

        Ok(())
    }

    #[test]
    fn failed_rename_leaves_no_staging_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::open(dir.path())?;

        let blocked = dir.path().join("orders.json");
        fs::create_dir(&blocked)?;
        fs::write(blocked.join("keep"), "x")?;

        let result = store.set("orders", "[]".to_string());

        assert!(
            matches!(result, Err(StorageError::Io(_))),
            "expected Io, got {result:?}"
        );
        assert!(!dir.path().join("orders.json.tmp").exists());

        Ok(())
    }

    #[test]
    fn path_like_keys_are_rejected() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::open(dir.path())?;

        for key in ["", "../escape", ".hidden", "a/b"] {
            let result = store.set(key, "x".to_string());

            assert!(
                matches!(result, Err(StorageError::InvalidKey(_))),
                "expected InvalidKey for {key:?}, got {result:?}"
            );
        }

        Ok(())
    }
}
