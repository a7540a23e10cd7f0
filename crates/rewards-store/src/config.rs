//! # Store Configuration
//!
//! Lifetimes and limits for the in-memory stores.

use std::time::Duration;

use crate::error::{StoreError, StoreResult};

/// Receipts live for 12 hours.
pub const DEFAULT_RECEIPT_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// Expired entries are swept every 12 hours.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(12 * 60 * 60);

/// ID collision retries before giving up.
pub const DEFAULT_MAX_ID_ATTEMPTS: u32 = 16;

/// Store configuration.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use rewards_store::StoreConfig;
///
/// let config = StoreConfig::new()
///     .receipt_ttl(Duration::from_secs(3600))
///     .marker_ttl(Some(Duration::from_secs(86400)))
///     .max_id_attempts(4);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// How long a stored receipt stays retrievable.
    /// Default: 12 hours
    pub receipt_ttl: Duration,

    /// How long a processed marker is remembered.
    /// Default: `None` (forever)
    pub marker_ttl: Option<Duration>,

    /// Maximum ID generation attempts per submission.
    /// Default: 16
    pub max_id_attempts: u32,

    /// Period of the background expiry sweep.
    /// Default: 12 hours
    pub sweep_interval: Duration,
}

impl StoreConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        StoreConfig {
            receipt_ttl: DEFAULT_RECEIPT_TTL,
            marker_ttl: None,
            max_id_attempts: DEFAULT_MAX_ID_ATTEMPTS,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }

    /// Sets the receipt lifetime.
    pub fn receipt_ttl(mut self, ttl: Duration) -> Self {
        self.receipt_ttl = ttl;
        self
    }

    /// Sets the processed-marker lifetime (`None` = never expires).
    pub fn marker_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.marker_ttl = ttl;
        self
    }

    /// Sets the ID generation retry cap.
    pub fn max_id_attempts(mut self, attempts: u32) -> Self {
        self.max_id_attempts = attempts;
        self
    }

    /// Sets the expiry sweep period.
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Rejects zero lifetimes, a zero sweep period and a zero retry cap.
    pub fn validate(&self) -> StoreResult<()> {
        if self.receipt_ttl.is_zero() {
            return Err(StoreError::InvalidConfig(
                "receipt TTL must be greater than zero".to_string(),
            ));
        }
        if self.marker_ttl.is_some_and(|ttl| ttl.is_zero()) {
            return Err(StoreError::InvalidConfig(
                "marker TTL must be greater than zero when set".to_string(),
            ));
        }
        if self.sweep_interval.is_zero() {
            return Err(StoreError::InvalidConfig(
                "sweep interval must be greater than zero".to_string(),
            ));
        }
        if self.max_id_attempts == 0 {
            return Err(StoreError::InvalidConfig(
                "max ID attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}
