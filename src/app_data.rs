use std::sync::Arc;

use crate::config::DatabaseConnections;
use crate::providers::ItemProvider;
use crate::stores::ItemStore;

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once in main.rs and shared across coordinators.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init(connections)
///   ├─ connections (DatabaseConnections)
///   ├─ item_store (Arc<ItemStore>)
///   └─ item_provider (Arc<ItemProvider>)
///   ↓ wrapped in Arc<AppData>
///   └─ ItemCoordinator::new(app_data)
/// ```
pub struct AppData {
    pub connections: DatabaseConnections,
    pub item_store: Arc<ItemStore>,
    pub item_provider: Arc<ItemProvider>,
}

impl AppData {
    /// Build stores and providers on top of already migrated connections
    pub fn init(connections: DatabaseConnections) -> Self {
        tracing::debug!("Initializing AppData...");

        let item_store = Arc::new(ItemStore::new());
        let item_provider = Arc::new(ItemProvider::new(item_store.clone()));

        tracing::debug!("AppData initialization complete");

        Self {
            connections,
            item_store,
            item_provider,
        }
    }
}
