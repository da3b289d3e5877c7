//! # Cache Store
//!
//! In-memory view of the `name -> hash` index, backed by an
//! [`IndexStorage`]. Loaded once at construction and shared by reference
//! for the life of the process.
//!
//! ## Invariants
//!
//! - If `lookup(name) == Some(h)` and the asset file for `name` exists, the
//!   file holds the content fingerprinted by `h`. Nothing re-hashes the
//!   file on read.
//! - [`CacheStore::record`] persists before it publishes: a failed flush
//!   leaves both the durable document and the in-memory map unchanged.
//! - Updates are serialized, so the durable document always reflects the
//!   last completed `record`.

use std::path::Path;

use parking_lot::RwLock;

use crate::error::CacheError;
use crate::storage::{HashIndex, IndexStorage};

/// Process-wide name-to-hash index.
#[derive(Debug)]
pub struct CacheStore<S> {
    storage: S,
    index: RwLock<HashIndex>,
}

impl<S: IndexStorage> CacheStore<S> {
    /// Load the index from `storage`.
    pub fn open(storage: S) -> Result<Self, CacheError> {
        let index = storage.load()?;
        tracing::debug!(entries = index.len(), "cache index loaded");
        Ok(Self {
            storage,
            index: RwLock::new(index),
        })
    }

    /// Last recorded hash for `name`.
    pub fn lookup(&self, name: &str) -> Option<String> {
        self.index.read().get(name).cloned()
    }

    /// True iff `name` is recorded with exactly `hash` **and** a file
    /// exists at `asset_path`. A recorded entry whose file has gone
    /// missing is a miss.
    pub fn is_fresh(&self, name: &str, hash: &str, asset_path: &Path) -> bool {
        let recorded = self.index.read().get(name).is_some_and(|h| h == hash);
        recorded && asset_path.is_file()
    }

    /// Upsert `name -> hash` and durably persist the whole index before
    /// returning. Last writer wins.
    pub fn record(&self, name: &str, hash: &str) -> Result<(), CacheError> {
        let mut index = self.index.write();
        if index.get(name).is_some_and(|h| h == hash) {
            return Ok(());
        }
        let mut next = index.clone();
        next.insert(name.to_string(), hash.to_string());
        self.storage.save(&next)?;
        *index = next;
        tracing::debug!(name, hash, "cache index updated");
        Ok(())
    }

    /// Sorted snapshot of every entry.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.index
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.index.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.read().is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JsonFileStorage, MemoryStorage};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Storage whose saves always fail.
    #[derive(Default)]
    struct FailingStorage {
        attempts: AtomicUsize,
    }

    impl IndexStorage for FailingStorage {
        fn load(&self) -> Result<HashIndex, CacheError> {
            let mut seeded = HashIndex::new();
            seeded.insert("ミカ".into(), "old".into());
            Ok(seeded)
        }

        fn save(&self, _index: &HashIndex) -> Result<(), CacheError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(CacheError::io(
                "/readonly/.hash_index.json",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ))
        }
    }

    #[test]
    fn lookup_reads_loaded_entries() {
        let mut seeded = HashIndex::new();
        seeded.insert("a".into(), "1".into());
        let store = CacheStore::open(MemoryStorage::with_index(seeded)).unwrap();
        assert_eq!(store.lookup("a").as_deref(), Some("1"));
        assert_eq!(store.lookup("b"), None);
    }

    #[test]
    fn record_persists_before_returning() {
        let store = CacheStore::open(MemoryStorage::new()).unwrap();
        store.record("a", "1").unwrap();
        assert_eq!(store.storage().snapshot().get("a").map(String::as_str), Some("1"));
        assert_eq!(store.lookup("a").as_deref(), Some("1"));
    }

    #[test]
    fn record_overwrites_last_writer_wins() {
        let store = CacheStore::open(MemoryStorage::new()).unwrap();
        store.record("a", "1").unwrap();
        store.record("a", "2").unwrap();
        assert_eq!(store.lookup("a").as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn failed_flush_leaves_map_unchanged() {
        let store = CacheStore::open(FailingStorage::default()).unwrap();
        assert!(store.record("ミカ", "new").is_err());
        assert!(store.record("other", "x").is_err());
        assert_eq!(store.lookup("ミカ").as_deref(), Some("old"));
        assert_eq!(store.lookup("other"), None);
        assert_eq!(store.storage().attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unchanged_hash_skips_flush() {
        let store = CacheStore::open(FailingStorage::default()).unwrap();
        store.record("ミカ", "old").unwrap();
        assert_eq!(store.storage().attempts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn fresh_requires_matching_hash_and_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let asset = dir.path().join("a.png");
        let store = CacheStore::open(MemoryStorage::new()).unwrap();
        store.record("a", "1").unwrap();

        // Entry present, file missing.
        assert!(!store.is_fresh("a", "1", &asset));

        std::fs::write(&asset, b"png").unwrap();
        assert!(store.is_fresh("a", "1", &asset));
        // Hash changed upstream.
        assert!(!store.is_fresh("a", "2", &asset));
        // File present, entry missing.
        assert!(!store.is_fresh("b", "1", &asset));
    }

    #[test]
    fn directory_at_asset_path_is_not_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let asset = dir.path().join("a.png");
        std::fs::create_dir(&asset).unwrap();
        let store = CacheStore::open(MemoryStorage::new()).unwrap();
        store.record("a", "1").unwrap();
        assert!(!store.is_fresh("a", "1", &asset));
    }

    #[test]
    fn index_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".hash_index.json");
        {
            let store = CacheStore::open(JsonFileStorage::new(&path)).unwrap();
            store.record("ミカ", "h1").unwrap();
            store.record("ホシノ", "h2").unwrap();
        }
        let store = CacheStore::open(JsonFileStorage::new(&path)).unwrap();
        assert_eq!(store.lookup("ミカ").as_deref(), Some("h1"));
        assert_eq!(store.lookup("ホシノ").as_deref(), Some("h2"));
    }

    #[test]
    fn entries_are_sorted_by_name() {
        let store = CacheStore::open(MemoryStorage::new()).unwrap();
        store.record("b", "2").unwrap();
        store.record("a", "1").unwrap();
        assert_eq!(
            store.entries(),
            vec![("a".to_string(), "1".to_string()), ("b".to_string(), "2".to_string())]
        );
        assert!(!store.is_empty());
    }
}
