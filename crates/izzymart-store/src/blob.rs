//! # Blob Store
//!
//! Opaque string key-value storage behind the preference store.
//!
//! ```text
//! ┌──────────────────────┐       ┌──────────────────────────────────────┐
//! │   PreferenceStore    │──────►│   dyn BlobStore                      │
//! │   (persist hook)     │       │                                      │
//! └──────────────────────┘       │   MemoryBlobStore  (tests, ephemeral)│
//!                                │   FileBlobStore    (preferences.json)│
//!                                └──────────────────────────────────────┘
//! ```
//!
//! Values are plain strings; callers decide what the string means (raw
//! text, JSON, `"true"`). The file store writes through on every change.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use directories::ProjectDirs;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "IZZYMART_DATA_DIR";

/// File name of the persisted blob map inside the data directory.
pub const BLOB_FILE_NAME: &str = "preferences.json";

// =============================================================================
// Trait
// =============================================================================

/// Persistent string key-value storage.
pub trait BlobStore: Send + Sync {
    /// Reads a value; `None` if the key was never written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

// =============================================================================
// In-Memory
// =============================================================================

/// Blob store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        MemoryBlobStore {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// File-Backed
// =============================================================================

/// Blob store persisted as one JSON object in a file.
///
/// ## File Format
/// ```text
/// {
///   "izzymart_camera_scanning": "false",
///   "izzymart_store_name": "IzzyMart",
///   "izzymart_theme": "{\"name\":\"Blue\",...}"
/// }
/// ```
///
/// The whole map is rewritten on every `set` via a temp file and a
/// rename, so a crash never leaves a half-written file behind.
#[derive(Debug)]
pub struct FileBlobStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileBlobStore {
    /// Opens (or prepares to create) the blob file at `path`.
    ///
    /// A missing or empty file is an empty store. The file is only created
    /// on the first write.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        info!(path = %path.display(), keys = entries.len(), "Blob store opened");

        Ok(FileBlobStore {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Opens the blob file at [`default_path`].
    pub fn open_default() -> StoreResult<Self> {
        Self::open(default_path()?)
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let contents = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;

        debug!(path = %self.path.display(), keys = entries.len(), "Blob store flushed");
        Ok(())
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }
}

/// Determines the blob file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.izzymart.register/preferences.json`
/// - **Windows**: `%APPDATA%\izzymart\register\data\preferences.json`
/// - **Linux**: `~/.local/share/register/preferences.json`
///
/// Set `IZZYMART_DATA_DIR` to use a custom directory.
pub fn default_path() -> StoreResult<PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir).join(BLOB_FILE_NAME));
    }

    let dirs = ProjectDirs::from("com", "izzymart", "register")
        .ok_or_else(|| StoreError::DataDir("no home directory".to_string()))?;

    Ok(dirs.data_dir().join(BLOB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_set() {
        let store = MemoryBlobStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.get("other").unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(BLOB_FILE_NAME);

        {
            let store = FileBlobStore::open(&path).unwrap();
            assert_eq!(store.get("izzymart_store_name").unwrap(), None);
            store.set("izzymart_store_name", "Corner Shop").unwrap();
            store.set("izzymart_camera_scanning", "true").unwrap();
        }

        let reopened = FileBlobStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("izzymart_store_name").unwrap().as_deref(),
            Some("Corner Shop")
        );
        assert_eq!(
            reopened.get("izzymart_camera_scanning").unwrap().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_file_store_overwrite_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(BLOB_FILE_NAME);

        let store = FileBlobStore::open(&path).unwrap();
        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();

        let reopened = FileBlobStore::open(&path).unwrap();
        assert_eq!(reopened.get("a").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(BLOB_FILE_NAME);
        fs::write(&path, "not json").unwrap();

        let err = FileBlobStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn test_empty_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(BLOB_FILE_NAME);
        fs::write(&path, "").unwrap();

        let store = FileBlobStore::open(&path).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);
    }
}
