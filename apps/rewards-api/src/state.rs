//! Shared application state.

use rewards_store::{StoreResult, Stores};

use crate::config::ApiConfig;

/// State handed to every handler through axum's `State` extractor.
///
/// Cheap to clone; clones share the same stores.
#[derive(Debug, Clone)]
pub struct AppState {
    pub stores: Stores,
}

impl AppState {
    /// Builds the stores described by `config`.
    pub fn new(config: &ApiConfig) -> StoreResult<Self> {
        Ok(Self::with_stores(Stores::new(config.store.clone())?))
    }

    /// Wraps already-built stores.
    pub fn with_stores(stores: Stores) -> Self {
        AppState { stores }
    }
}
