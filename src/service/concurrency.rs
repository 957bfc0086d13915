//! Synchronization primitives shared by the services.
//!
//! Gateway events are dispatched on their own tasks, so two events about the same
//! member can be processed at the same time. `KeyedLock` serializes work per key
//! (a member's party for one game) and `InFlight` lets an event handler skip a
//! member the bot is already processing.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Recovers the data of a poisoned mutex; the maps stay valid after a panic.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Map of async mutexes, one per key, created on demand.
///
/// Holding the guard returned by [`KeyedLock::lock`] excludes every other holder
/// of the same key while leaving other keys free. Entries are removed once the
/// last holder or waiter is gone, so the map only grows with contention.
pub struct KeyedLock<K> {
    locks: Mutex<HashMap<K, Arc<AsyncMutex<()>>>>,
}

impl<K> KeyedLock<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Waits until the key is free and locks it.
    ///
    /// # Arguments
    /// - `key` - Key to lock
    ///
    /// # Returns
    /// - `KeyedGuard` - Releases the key when dropped
    pub async fn lock(&self, key: K) -> KeyedGuard<'_, K> {
        let mutex = lock(&self.locks).entry(key.clone()).or_default().clone();
        let guard = mutex.clone().lock_owned().await;

        KeyedGuard {
            owner: self,
            key,
            mutex,
            guard: Some(guard),
        }
    }

    /// Number of keys currently held or waited on.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        lock(&self.locks).len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K> Default for KeyedLock<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive hold on one key of a [`KeyedLock`].
pub struct KeyedGuard<'a, K>
where
    K: Eq + Hash + Clone,
{
    owner: &'a KeyedLock<K>,
    key: K,
    mutex: Arc<AsyncMutex<()>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl<K> Drop for KeyedGuard<'_, K>
where
    K: Eq + Hash + Clone,
{
    fn drop(&mut self) {
        drop(self.guard.take());

        let mut locks = lock(&self.owner.locks);
        // One reference in the map and one here: nobody else holds or waits.
        if Arc::strong_count(&self.mutex) == 2 {
            locks.remove(&self.key);
        }
    }
}

/// Set of keys currently being processed.
///
/// Unlike [`KeyedLock`] it never waits: a second caller for a busy key is told
/// to back off.
pub struct InFlight<K> {
    keys: Mutex<HashSet<K>>,
}

impl<K> InFlight<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            keys: Mutex::new(HashSet::new()),
        }
    }

    /// Marks the key as busy unless it already is.
    ///
    /// # Returns
    /// - `Some(InFlightGuard)` - The key was free; it stays busy until the guard drops
    /// - `None` - The key is already being processed
    pub fn try_acquire(&self, key: K) -> Option<InFlightGuard<'_, K>> {
        if !lock(&self.keys).insert(key.clone()) {
            return None;
        }

        Some(InFlightGuard { owner: self, key })
    }

    #[cfg(test)]
    pub fn contains(&self, key: &K) -> bool {
        lock(&self.keys).contains(key)
    }
}

impl<K> Default for InFlight<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Busy marker for one key of an [`InFlight`] set.
pub struct InFlightGuard<'a, K>
where
    K: Eq + Hash + Clone,
{
    owner: &'a InFlight<K>,
    key: K,
}

impl<K> Drop for InFlightGuard<'_, K>
where
    K: Eq + Hash + Clone,
{
    fn drop(&mut self) {
        lock(&self.owner.keys).remove(&self.key);
    }
}
