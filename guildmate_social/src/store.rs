// Last-write-wins cache of the most recently fetched friends list.
//
// The store is the relay's only shared mutable state. It is injected at
// relay construction rather than living in a process-wide singleton, so
// embedders own its lifetime and tests can seed and inspect it directly.
// Cloning a `FriendsStore` yields another handle to the same storage.
//
// Concurrency discipline: plain `std::sync::Mutex`, held only for short,
// never-awaiting critical sections (replace / snapshot / find). Writers
// overwrite wholesale; readers get a point-in-time copy with no isolation
// against a concurrent writer. Staleness is cheap here — at worst a lookup
// misses a just-added friend — and the relay makes no stronger claim.
//
// There is deliberately no invalidation: no TTL, no eviction, no `clear`.
// The cache lives as long as its owner and is only ever replaced by a newer
// successful fetch.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::player::{PlayerId, RemotePlayer};

/// Shared handle to the friends cache.
#[derive(Clone, Default)]
pub struct FriendsStore {
    inner: Arc<Mutex<Option<Vec<RemotePlayer>>>>,
}

impl FriendsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// True until the first successful friends load.
    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }

    /// Replace the cached list wholesale (last write wins).
    pub fn replace(&self, friends: Vec<RemotePlayer>) {
        *self.lock() = Some(friends);
    }

    /// Point-in-time copy of the cached list, if it was ever populated.
    pub fn snapshot(&self) -> Option<Vec<RemotePlayer>> {
        self.lock().clone()
    }

    /// Scan the cache for the player with the given id.
    pub fn find(&self, id: &PlayerId) -> Option<RemotePlayer> {
        self.lock()
            .as_ref()
            .and_then(|list| list.iter().find(|p| p.id == *id).cloned())
    }

    // Nothing panics while holding the guard, so a poisoned lock still
    // carries a usable list.
    fn lock(&self) -> MutexGuard<'_, Option<Vec<RemotePlayer>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
