//! # arona-cache: Local Asset Cache
//!
//! Keeps one local copy of each downloaded strategy image, keyed by the
//! item's logical name, plus a durable index recording which content hash
//! each copy corresponds to.
//!
//! ## Layout
//!
//! ```text
//! {base_dir}/
//!   .hash_index.json     name -> hash, rewritten in full on each update
//!   ミカ.png              one file per logical name
//!   ホシノ.jpg
//! ```
//!
//! ## Write Ordering
//!
//! [`AssetCache::store_asset`] writes the asset bytes first (temp file +
//! rename) and records the hash second. An index entry therefore never
//! points at a partially written file, and a failed write leaves the index
//! untouched.
//!
//! ## Crate Policy
//!
//! - No network I/O. Downloading is the caller's concern.
//! - No eviction. The cache is append-only per name.

pub mod asset;
pub mod error;
pub mod locks;
pub mod storage;
pub mod store;

pub use asset::{asset_path, extension_of};
pub use error::CacheError;
pub use locks::NameLocks;
pub use storage::{HashIndex, IndexStorage, JsonFileStorage, MemoryStorage};
pub use store::CacheStore;

use std::path::{Path, PathBuf};

use arona_core::AssetName;
use tokio::sync::OwnedMutexGuard;

/// Filename of the index document inside the data directory.
pub const INDEX_FILE_NAME: &str = ".hash_index.json";

/// Data directory, index and lock table bundled together.
#[derive(Debug)]
pub struct AssetCache<S = JsonFileStorage> {
    base_dir: PathBuf,
    store: CacheStore<S>,
    locks: NameLocks,
}

impl AssetCache<JsonFileStorage> {
    /// Open (or start) the cache in `base_dir`, loading
    /// `{base_dir}/.hash_index.json` if present.
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let base_dir = base_dir.into();
        let storage = JsonFileStorage::new(base_dir.join(INDEX_FILE_NAME));
        Self::with_storage(base_dir, storage)
    }
}

impl<S: IndexStorage> AssetCache<S> {
    /// Use an explicit index storage; assets still live under `base_dir`.
    pub fn with_storage(base_dir: impl Into<PathBuf>, storage: S) -> Result<Self, CacheError> {
        let base_dir = base_dir.into();
        let store = CacheStore::open(storage)?;
        tracing::info!(
            base_dir = %base_dir.display(),
            entries = store.len(),
            "asset cache opened"
        );
        Ok(Self {
            base_dir,
            store,
            locks: NameLocks::new(),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn store(&self) -> &CacheStore<S> {
        &self.store
    }

    /// Local path for `name`, extension taken from the remote `content` path.
    pub fn asset_path(&self, name: &AssetName, content: &str) -> PathBuf {
        asset::asset_path(&self.base_dir, name, content)
    }

    /// See [`CacheStore::is_fresh`].
    pub fn is_fresh(&self, name: &AssetName, hash: &str, path: &Path) -> bool {
        self.store.is_fresh(name.as_str(), hash, path)
    }

    /// Exclusive access to `name` for a check-download-store sequence.
    pub async fn lock(&self, name: &AssetName) -> OwnedMutexGuard<()> {
        self.locks.acquire(name.as_str()).await
    }

    /// Write `bytes` to `path` (overwriting), then record `name -> hash`.
    ///
    /// Callers should hold [`AssetCache::lock`] for `name`.
    pub fn store_asset(
        &self,
        name: &AssetName,
        hash: &str,
        path: &Path,
        bytes: &[u8],
    ) -> Result<(), CacheError> {
        storage::write_atomic(path, bytes)?;
        self.store.record(name.as_str(), hash)?;
        tracing::info!(
            name = %name,
            hash,
            path = %path.display(),
            bytes = bytes.len(),
            "asset cached"
        );
        Ok(())
    }
}
