//! # Processed Markers
//!
//! Remembers which receipt IDs have already had their points awarded.
//! By default a marker never expires, so it outlives the receipt itself.
//!
//! `mark_processed` is a single check-and-set: when two requests race on
//! the same ID, exactly one of them wins.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::error::StoreResult;
use crate::ttl::TtlMap;

/// Set of receipt IDs whose points have been awarded.
#[derive(Debug, Clone)]
pub struct ProcessedMarkers {
    entries: Arc<TtlMap<()>>,
}

impl ProcessedMarkers {
    /// Creates an empty marker set (`ttl = None` keeps markers forever).
    pub fn new(ttl: Option<Duration>) -> Self {
        ProcessedMarkers {
            entries: Arc::new(TtlMap::new("processed", ttl)),
        }
    }

    /// True when points for `id` were already awarded.
    pub fn is_processed(&self, id: &str) -> StoreResult<bool> {
        self.entries.contains(id)
    }

    /// Marks `id` as processed.
    ///
    /// ## Returns
    /// * `Ok(true)` - this call set the marker
    /// * `Ok(false)` - the marker was already set
    pub fn mark_processed(&self, id: &str) -> StoreResult<bool> {
        let marked = self.entries.insert_if_absent(id, ())?;
        if marked {
            debug!(receipt_id = %id, "Receipt marked processed");
        }
        Ok(marked)
    }

    /// Number of live markers.
    pub fn len(&self) -> StoreResult<usize> {
        self.entries.len()
    }

    /// True when no live marker is set.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Drops expired markers, returning how many were dropped.
    pub fn purge_expired(&self) -> StoreResult<usize> {
        self.entries.purge_expired()
    }
}
