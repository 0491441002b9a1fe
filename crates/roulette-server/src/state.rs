//! Shared application state.
//!
//! The only shared resource is the item store; handlers clone the
//! `Arc` handle, not the store itself.

use std::sync::Arc;

use roulette_core::SqliteItemStore;

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The durable item store.
    pub store: Arc<SqliteItemStore>,
}

impl AppState {
    /// Creates application state around an opened store.
    #[must_use]
    pub fn new(store: SqliteItemStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
