//! # rewards-core: Pure Business Logic for Receipt Rewards
//!
//! This crate is the **heart** of Receipt Rewards. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Receipt Rewards Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                    rewards-api (axum)                           │    │
//! │  │   POST /receipts/process        GET /receipts/{id}/points       │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ rewards-core (THIS CRATE) ★                     │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │    │
//! │  │   │   types   │  │   money   │  │validation │  │  points   │    │    │
//! │  │   │  Receipt  │  │   Money   │  │ Validator │  │Calculator │    │    │
//! │  │   │   Item    │  │  (cents)  │  │           │  │ 7 rules   │    │    │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘    │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO STORAGE • NO LOCKS • PURE FUNCTIONS               │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                 rewards-store (TTL stores)                      │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Receipt and Item as submitted
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Receipt and ID validation
//! - [`points`] - Points rules and calculator
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Stores, network, file system access are FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod points;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CalculationError, MoneyError, ValidationError};
pub use money::Money;
pub use points::{calculate_breakdown, calculate_points, PointsBreakdown};
pub use types::{Item, Receipt};
pub use validation::{validate_receipt, validate_receipt_id};
