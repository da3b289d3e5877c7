//! Per-name download locks.
//!
//! One async mutex per logical name. Holding it across the freshness
//! check, download, write and record guarantees at most one in-flight
//! download and one writer per asset file. Different names never contend.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Lazily created lock table keyed by logical name.
///
/// Entries are never removed; the table grows with the set of names ever
/// downloaded, the same as the index itself.
#[derive(Debug, Default)]
pub struct NameLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl NameLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `name`.
    pub async fn acquire(&self, name: &str) -> OwnedMutexGuard<()> {
        // Clone the Arc out so the DashMap shard lock is released before
        // awaiting.
        let lock = Arc::clone(
            self.locks
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        );
        lock.lock_owned().await
    }

    /// Number of names that have ever been locked.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
