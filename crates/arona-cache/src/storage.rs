//! # Index Storage
//!
//! The durable half of the cache index: a single document mapping logical
//! name to content hash, loaded once and rewritten in full on every update.
//!
//! ## Atomicity
//!
//! [`JsonFileStorage::save`] writes the whole document to a temp file in
//! the same directory, flushes it, and renames it over the old document.
//! A crash mid-write leaves the previous document intact.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tempfile::NamedTempFile;

use crate::error::CacheError;

/// The full `name -> hash` mapping.
pub type HashIndex = BTreeMap<String, String>;

/// Durable backing store for a [`CacheStore`](crate::CacheStore).
///
/// Implementations must be `Send + Sync` so the store can be shared across
/// async tasks behind an `Arc`.
pub trait IndexStorage: Send + Sync {
    /// Load the persisted mapping. A store that has never been written
    /// loads as empty.
    fn load(&self) -> Result<HashIndex, CacheError>;

    /// Durably replace the persisted mapping. Returns only after the data
    /// is written.
    fn save(&self, index: &HashIndex) -> Result<(), CacheError>;
}

/// Index document stored as a UTF-8 JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IndexStorage for JsonFileStorage {
    fn load(&self) -> Result<HashIndex, CacheError> {
        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no index document yet, starting empty");
                return Ok(HashIndex::new());
            }
            Err(e) => return Err(CacheError::io(&self.path, e)),
        };
        serde_json::from_slice(&raw).map_err(|source| CacheError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, index: &HashIndex) -> Result<(), CacheError> {
        let encoded = serde_json::to_vec_pretty(index)?;
        write_atomic(&self.path, &encoded)
    }
}

/// Write `bytes` to `path` via a same-directory temp file and rename.
///
/// Creates the parent directory if needed. `path` either keeps its old
/// content or receives all of `bytes`, never a prefix.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CacheError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| CacheError::io(parent, e))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| CacheError::io(parent, e))?;
    tmp.write_all(bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| CacheError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| CacheError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

/// In-process index storage. Nothing survives the process; used for
/// embedding without a data directory and in tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    saved: Mutex<HashIndex>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the storage as if `index` had been saved earlier.
    pub fn with_index(index: HashIndex) -> Self {
        Self {
            saved: Mutex::new(index),
        }
    }

    /// Snapshot of the last saved mapping.
    pub fn snapshot(&self) -> HashIndex {
        self.saved.lock().clone()
    }
}

impl IndexStorage for MemoryStorage {
    fn load(&self) -> Result<HashIndex, CacheError> {
        Ok(self.saved.lock().clone())
    }

    fn save(&self, index: &HashIndex) -> Result<(), CacheError> {
        *self.saved.lock() = index.clone();
        Ok(())
    }
}
