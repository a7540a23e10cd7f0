//! # Receipt Store
//!
//! Holds submitted receipts under generated IDs for a fixed lifetime.
//!
//! ## Submission
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  insert_with_generated_id(receipt)                                      │
//! │       │                                                                 │
//! │       ▼  (write lock held for the whole loop)                           │
//! │  ┌──────────────┐   live entry?   ┌──────────────┐                      │
//! │  │ id_source    │ ──── yes ─────► │ retry        │ (up to max attempts) │
//! │  │  .next_id()  │                 └──────────────┘                      │
//! │  └──────┬───────┘                                                       │
//! │         │ no                                                            │
//! │         ▼                                                               │
//! │  store (id → receipt, expires now + receipt_ttl), return id             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use rewards_core::Receipt;
use tracing::debug;

use crate::error::StoreResult;
use crate::id::IdSource;
use crate::ttl::TtlMap;

/// Store of submitted receipts keyed by receipt ID.
///
/// Cloning is cheap and every clone sees the same entries.
///
/// ## Usage
/// ```rust
/// use std::sync::Arc;
/// use std::time::Duration;
/// use rewards_core::Receipt;
/// use rewards_store::{ReceiptStore, UuidIdSource};
///
/// let store = ReceiptStore::new(Duration::from_secs(60), 16, Arc::new(UuidIdSource));
/// let id = store.insert_with_generated_id(Receipt::default()).unwrap();
///
/// assert!(store.contains(&id).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct ReceiptStore {
    entries: Arc<TtlMap<Arc<Receipt>>>,
    id_source: Arc<dyn IdSource>,
    max_id_attempts: u32,
}

impl ReceiptStore {
    /// Creates an empty store.
    pub fn new(ttl: Duration, max_id_attempts: u32, id_source: Arc<dyn IdSource>) -> Self {
        ReceiptStore {
            entries: Arc::new(TtlMap::new("receipts", Some(ttl))),
            id_source,
            max_id_attempts,
        }
    }

    /// Returns the live receipt stored under `id`, if any.
    pub fn get(&self, id: &str) -> StoreResult<Option<Arc<Receipt>>> {
        self.entries.get(id)
    }

    /// True when a live receipt is stored under `id`.
    pub fn contains(&self, id: &str) -> StoreResult<bool> {
        self.entries.contains(id)
    }

    /// Stores `receipt` under a freshly generated ID and returns the ID.
    ///
    /// ## Returns
    /// * `Ok(id)` - ID that had no live entry at insertion time
    /// * `Err(StoreError::IdGenerationExhausted)` - every attempt collided
    pub fn insert_with_generated_id(&self, receipt: Receipt) -> StoreResult<String> {
        let id = self.entries.insert_with_fresh_key(
            Arc::new(receipt),
            self.max_id_attempts,
            || self.id_source.next_id(),
        )?;

        debug!(receipt_id = %id, "Receipt stored");
        Ok(id)
    }

    /// Removes the receipt stored under `id`.
    pub fn remove(&self, id: &str) -> StoreResult<bool> {
        self.entries.remove(id)
    }

    /// Number of live receipts.
    pub fn len(&self) -> StoreResult<usize> {
        self.entries.len()
    }

    /// True when no live receipt is stored.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Drops expired receipts, returning how many were dropped.
    pub fn purge_expired(&self) -> StoreResult<usize> {
        self.entries.purge_expired()
    }
}
