//! # Expiring Map
//!
//! A string-keyed map whose entries carry an optional deadline. Both the
//! receipt store and the processed markers are built on it.
//!
//! ## Expiry
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  insert(id) at t0 with ttl 12h → deadline t0 + 12h                      │
//! │                                                                         │
//! │  t < deadline    get(id) → Some(value)                                  │
//! │  t ≥ deadline    get(id) → None        (entry still in memory)          │
//! │  purge_expired() at t ≥ deadline → entry dropped                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every read treats an expired entry as absent, so correctness never
//! depends on how often the sweep runs. The sweep only bounds memory.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    expires_at: Option<Instant>,
}

impl<V> Entry<V> {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |deadline| now < deadline)
    }
}

/// Thread-safe map with per-entry expiry.
#[derive(Debug)]
pub(crate) struct TtlMap<V> {
    /// Store name used in logs and errors.
    name: &'static str,
    /// Lifetime given to every inserted entry (`None` = forever).
    ttl: Option<Duration>,
    entries: RwLock<HashMap<String, Entry<V>>>,
}

impl<V: Clone> TtlMap<V> {
    pub(crate) fn new(name: &'static str, ttl: Option<Duration>) -> Self {
        TtlMap {
            name,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, Entry<V>>>> {
        self.entries.read().map_err(|_| StoreError::poisoned(self.name))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, Entry<V>>>> {
        self.entries.write().map_err(|_| StoreError::poisoned(self.name))
    }

    /// A lifetime too long to represent as an `Instant` never expires.
    fn deadline(&self, now: Instant) -> Option<Instant> {
        self.ttl.and_then(|ttl| now.checked_add(ttl))
    }

    /// Returns a copy of the live value for `key`.
    pub(crate) fn get(&self, key: &str) -> StoreResult<Option<V>> {
        let now = Instant::now();
        let entries = self.read()?;
        Ok(entries
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.value.clone()))
    }

    /// True when `key` has a live entry.
    pub(crate) fn contains(&self, key: &str) -> StoreResult<bool> {
        let now = Instant::now();
        let entries = self.read()?;
        Ok(entries.get(key).is_some_and(|e| e.is_live(now)))
    }

    /// Inserts `value` under `key` unless a live entry already exists.
    ///
    /// Returns `true` if this call inserted. Check and insert happen under
    /// one write lock.
    pub(crate) fn insert_if_absent(&self, key: &str, value: V) -> StoreResult<bool> {
        let now = Instant::now();
        let deadline = self.deadline(now);
        let mut entries = self.write()?;

        if entries.get(key).is_some_and(|e| e.is_live(now)) {
            return Ok(false);
        }

        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: deadline,
            },
        );
        Ok(true)
    }

    /// Draws keys from `next_key` until one has no live entry, then inserts
    /// `value` under it. The whole loop runs under one write lock.
    pub(crate) fn insert_with_fresh_key<F>(
        &self,
        value: V,
        max_attempts: u32,
        mut next_key: F,
    ) -> StoreResult<String>
    where
        F: FnMut() -> String,
    {
        let now = Instant::now();
        let deadline = self.deadline(now);
        let mut entries = self.write()?;

        for attempt in 1..=max_attempts {
            let key = next_key();
            if entries.get(&key).is_some_and(|e| e.is_live(now)) {
                debug!(store = self.name, attempt, key = %key, "Key collision, retrying");
                continue;
            }

            entries.insert(
                key.clone(),
                Entry {
                    value,
                    expires_at: deadline,
                },
            );
            return Ok(key);
        }

        Err(StoreError::IdGenerationExhausted {
            attempts: max_attempts,
        })
    }

    /// Removes `key`, returning whether a live entry was removed.
    pub(crate) fn remove(&self, key: &str) -> StoreResult<bool> {
        let now = Instant::now();
        let mut entries = self.write()?;
        Ok(entries.remove(key).is_some_and(|e| e.is_live(now)))
    }

    /// Number of live entries.
    pub(crate) fn len(&self) -> StoreResult<usize> {
        let now = Instant::now();
        let entries = self.read()?;
        Ok(entries.values().filter(|e| e.is_live(now)).count())
    }

    /// Drops every expired entry and returns how many were dropped.
    pub(crate) fn purge_expired(&self) -> StoreResult<usize> {
        let now = Instant::now();
        let mut entries = self.write()?;
        let before = entries.len();
        entries.retain(|_, e| e.is_live(now));
        let purged = before - entries.len();
        if purged > 0 {
            debug!(store = self.name, purged, "Purged expired entries");
        }
        Ok(purged)
    }
}
