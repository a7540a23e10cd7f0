//! # Store Error Types
//!
//! Error types for store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  RwLock poisoned / ID space "exhausted" / bad config                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in app) ← Always 500, generic message                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing or expired receipt is NOT an error here: lookups return
//! `Ok(None)` and the caller decides that means 404.

use thiserror::Error;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A thread panicked while holding the store lock.
    ///
    /// ## When This Occurs
    /// - Never in normal operation; store operations do not panic while
    ///   holding the lock
    #[error("{store} store lock poisoned")]
    LockPoisoned { store: &'static str },

    /// Every generated ID collided with a live entry.
    ///
    /// ## When This Occurs
    /// - Practically never with UUID v4 (122 random bits)
    /// - A broken or scripted ID source
    #[error("Failed to generate a unique receipt ID after {attempts} attempts")]
    IdGenerationExhausted { attempts: u32 },

    /// Store configuration rejected at construction.
    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    /// Creates a LockPoisoned error for the named store.
    pub fn poisoned(store: &'static str) -> Self {
        StoreError::LockPoisoned { store }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StoreError::poisoned("receipts").to_string(),
            "receipts store lock poisoned"
        );
        assert_eq!(
            StoreError::IdGenerationExhausted { attempts: 16 }.to_string(),
            "Failed to generate a unique receipt ID after 16 attempts"
        );
    }
}
