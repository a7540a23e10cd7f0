//! # rewards-store: In-Memory Stores for Receipt Rewards
//!
//! Thread-safe, expiring key-value stores for submitted receipts and for
//! the "points already awarded" markers. Nothing is persisted; a restart
//! starts empty.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Receipt Rewards Data Flow                          │
//! │                                                                         │
//! │  POST /receipts/process          GET /receipts/{id}/points              │
//! │       │                                │                                │
//! │       ▼                                ▼                                │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                  rewards-store (THIS CRATE)                     │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐    │    │
//! │  │   │    Stores     │    │ ReceiptStore  │    │  Processed   │    │    │
//! │  │   │ (stores.rs)   │───►│ id → Receipt  │    │  Markers     │    │    │
//! │  │   │               │    │ 12h TTL       │    │ id → ()      │    │    │
//! │  │   │ purge_expired │───►│               │    │ no expiry    │    │    │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘    │    │
//! │  │                                                                 │    │
//! │  │   RwLock<HashMap> per store • expired entries read as absent    │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Lifetimes and retry limits
//! - [`error`] - Store error types
//! - [`id`] - Receipt ID sources
//! - [`receipts`] - Receipt store
//! - [`markers`] - Processed markers
//! - [`stores`] - Handle owning both stores
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rewards_store::{StoreConfig, Stores};
//!
//! let stores = Stores::new(StoreConfig::default())?;
//!
//! let id = stores.receipts().insert_with_generated_id(receipt)?;
//! let receipt = stores.receipts().get(&id)?;
//! let first_time = stores.markers().mark_processed(&id)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod id;
pub mod markers;
pub mod receipts;
pub mod stores;
mod ttl;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use id::{IdSource, UuidIdSource};
pub use markers::ProcessedMarkers;
pub use receipts::ReceiptStore;
pub use stores::{PurgeStats, Stores};
