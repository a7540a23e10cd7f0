//! # Error Types
//!
//! Domain-specific error types for rewards-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rewards-core errors (this file)                                        │
//! │  ├── ValidationError   - Submitted receipt is rejected (client fault)   │
//! │  ├── CalculationError  - Scoring could not parse its input (our fault)  │
//! │  └── MoneyError        - Amount string is not a two-decimal number      │
//! │                                                                         │
//! │  rewards-store errors (separate crate)                                  │
//! │  └── StoreError        - Lock poisoning, ID generation exhausted        │
//! │                                                                         │
//! │  API errors (in app)                                                    │
//! │  └── ApiError          - What the HTTP caller sees                      │
//! │                                                                         │
//! │  Flow: ValidationError ──► 400                                          │
//! │        CalculationError ─► 500 (detail logged, never returned)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, offending value)
//! 3. Errors are enum variants, never String
//! 4. Each validation variant maps to one human-readable reason

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Validation Error
// =============================================================================

/// Receipt validation errors.
///
/// Every variant names the offending field using its JSON name, so the
/// message can be handed back to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// The receipt has no items.
    #[error("At least one item is required")]
    NoItems,

    /// Field contains characters outside letters, digits, `_`, whitespace and `-`.
    #[error("{field} has invalid characters")]
    InvalidCharacters { field: String },

    /// Invalid format (e.g., bad date, bad amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Item prices do not add up to the receipt total.
    #[error("Total amount {total} does not match the sum of item prices {items_sum}")]
    TotalMismatch { total: Money, items_sum: Money },
}

impl ValidationError {
    /// Creates a Required error.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates an InvalidCharacters error.
    pub fn invalid_characters(field: impl Into<String>) -> Self {
        ValidationError::InvalidCharacters {
            field: field.into(),
        }
    }

    /// Creates an InvalidFormat error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Calculation Error
// =============================================================================

/// Points calculation errors.
///
/// ## When This Occurs
/// Only when the calculator is handed a receipt that did not pass
/// validation. A validated receipt always scores successfully, so any of
/// these reaching the API layer means validation and scoring disagree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculationError {
    /// An item that qualifies for the description rule has an unparsable price.
    #[error("failed to parse price of item {index} ({value:?}): {source}")]
    InvalidPrice {
        index: usize,
        value: String,
        #[source]
        source: MoneyError,
    },

    /// Receipt total is not a two-decimal amount.
    #[error("failed to parse total ({value:?}): {source}")]
    InvalidTotal {
        value: String,
        #[source]
        source: MoneyError,
    },

    /// Purchase date is not `YYYY-MM-DD`.
    #[error("failed to parse purchase date {0:?}")]
    InvalidDate(String),

    /// Purchase time is not `HH:MM`.
    #[error("failed to parse purchase time {0:?}")]
    InvalidTime(String),
}

// =============================================================================
// Money Error
// =============================================================================

/// Errors from parsing an amount string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Not of the form `<digits>.<two digits>`.
    #[error("expected digits followed by '.' and exactly two digits")]
    Malformed,

    /// Too many dollars to fit in i64 cents.
    #[error("amount is too large")]
    Overflow,
}

// =============================================================================
// Unit Tests
// =============================================================================
