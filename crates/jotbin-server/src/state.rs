//! Application state shared across handlers.

use std::sync::Arc;

use jotbin_store::{StoreAdapter, TableConfig};

/// Application state shared across all handlers.
///
/// This is cloneable and holds the only two things a handler needs: the
/// store adapter and the immutable table configuration.
#[derive(Clone)]
pub struct AppState {
    /// Store adapter backing all persistence.
    store: Arc<dyn StoreAdapter>,
    /// Table names and key schemas, injected once at process start.
    tables: Arc<TableConfig>,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: Arc<dyn StoreAdapter>, tables: TableConfig) -> Self {
        Self {
            store,
            tables: Arc::new(tables),
        }
    }

    /// Get a reference to the store adapter.
    pub fn store(&self) -> &dyn StoreAdapter {
        self.store.as_ref()
    }

    /// Get a reference to the table configuration.
    pub fn tables(&self) -> &TableConfig {
        &self.tables
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tables", &self.tables)
            .finish_non_exhaustive()
    }
}
