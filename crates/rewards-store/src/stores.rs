//! # Store Handle
//!
//! One cloneable handle owning both stores, handed to request handlers.

use std::sync::Arc;

use tracing::info;

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::id::{IdSource, UuidIdSource};
use crate::markers::ProcessedMarkers;
use crate::receipts::ReceiptStore;

/// Handle to the receipt store and the processed markers.
///
/// ## Why a Handle?
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Stores (cheap Clone, shared state)                                     │
/// │  ├── receipts()  → ReceiptStore       id → receipt, 12h lifetime        │
/// │  ├── markers()   → ProcessedMarkers   id → (), no expiry by default     │
/// │  └── purge_expired()                  called by the background sweeper  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Example
/// ```rust
/// use rewards_core::Receipt;
/// use rewards_store::{StoreConfig, Stores};
///
/// let stores = Stores::new(StoreConfig::default()).unwrap();
/// let id = stores.receipts().insert_with_generated_id(Receipt::default()).unwrap();
///
/// assert!(stores.markers().mark_processed(&id).unwrap());
/// assert!(!stores.markers().mark_processed(&id).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Stores {
    receipts: ReceiptStore,
    markers: ProcessedMarkers,
}

/// Entries dropped by one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeStats {
    pub receipts: usize,
    pub markers: usize,
}

impl Stores {
    /// Creates empty stores using random UUID v4 receipt IDs.
    ///
    /// ## Returns
    /// * `Err(StoreError::InvalidConfig)` - a zero lifetime or retry cap
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        Self::with_id_source(config, Arc::new(UuidIdSource))
    }

    /// Creates empty stores drawing receipt IDs from `id_source`.
    pub fn with_id_source(config: StoreConfig, id_source: Arc<dyn IdSource>) -> StoreResult<Self> {
        config.validate()?;

        info!(
            receipt_ttl_secs = config.receipt_ttl.as_secs(),
            marker_ttl_secs = config.marker_ttl.map(|ttl| ttl.as_secs()),
            max_id_attempts = config.max_id_attempts,
            "Initializing receipt stores"
        );

        Ok(Stores {
            receipts: ReceiptStore::new(config.receipt_ttl, config.max_id_attempts, id_source),
            markers: ProcessedMarkers::new(config.marker_ttl),
        })
    }

    /// Returns the receipt store.
    pub fn receipts(&self) -> &ReceiptStore {
        &self.receipts
    }

    /// Returns the processed markers.
    pub fn markers(&self) -> &ProcessedMarkers {
        &self.markers
    }

    /// Drops expired entries from both stores.
    pub fn purge_expired(&self) -> StoreResult<PurgeStats> {
        Ok(PurgeStats {
            receipts: self.receipts.purge_expired()?,
            markers: self.markers.purge_expired()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use rewards_core::Receipt;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_rejects_invalid_config() {
        let config = StoreConfig::new().max_id_attempts(0);
        assert!(matches!(
            Stores::new(config),
            Err(StoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_clones_share_state() {
        let stores = Stores::new(StoreConfig::default()).unwrap();
        let other = stores.clone();

        let id = stores
            .receipts()
            .insert_with_generated_id(Receipt::default())
            .unwrap();
        assert!(other.receipts().contains(&id).unwrap());

        other.markers().mark_processed(&id).unwrap();
        assert!(stores.markers().is_processed(&id).unwrap());
    }

    #[test]
    fn test_marker_outlives_receipt() {
        let config = StoreConfig::new().receipt_ttl(Duration::from_millis(20));
        let stores = Stores::new(config).unwrap();

        let id = stores
            .receipts()
            .insert_with_generated_id(Receipt::default())
            .unwrap();
        stores.markers().mark_processed(&id).unwrap();

        thread::sleep(Duration::from_millis(40));

        assert_eq!(
            stores.purge_expired().unwrap(),
            PurgeStats {
                receipts: 1,
                markers: 0
            }
        );
        assert!(!stores.receipts().contains(&id).unwrap());
        assert!(stores.markers().is_processed(&id).unwrap());
    }
}
