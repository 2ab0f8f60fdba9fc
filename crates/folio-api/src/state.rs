//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. It holds the persistence handle and nothing
//! else; handlers keep no records in memory after a write completes.

use std::sync::Arc;

use crate::db::memory::MemoryStore;
use crate::db::{DocumentStore, SharedStore};

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Process-wide persistence handle. Handlers borrow it; only the
    /// binary's shutdown path closes it.
    pub store: SharedStore,
}

impl AppState {
    /// Wrap an already-connected store.
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// State backed by a fresh [`MemoryStore`], returned alongside it so
    /// callers can inspect what handlers wrote.
    pub fn in_memory() -> (Self, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (Self::new(store.clone()), store)
    }

    /// Borrow the store.
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}
