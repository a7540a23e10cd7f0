//! # rewards-api: HTTP Service for Receipt Rewards
//!
//! Accepts receipts, assigns them IDs and serves their points once.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /receipts/process       Receipt JSON → {"id": "<uuid>"}           │
//! │  GET  /receipts/{id}/points   → {"points": N}, then {"points": 0}       │
//! │  GET  /health                 → OK                                      │
//! │                                                                         │
//! │  Errors are plain text: 400 bad input, 404 unknown id, 500 internal     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Environment-driven configuration
//! - [`error`] - API errors and their HTTP mapping
//! - [`dto`] - Response bodies
//! - [`handlers`] - Request handlers
//! - [`routes`] - Router construction
//! - [`state`] - Shared handler state
//! - [`sweeper`] - Background expiry sweep

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod sweeper;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
pub use sweeper::spawn_sweeper;
