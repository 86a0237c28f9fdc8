// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::app_data::AppData;
use crate::config::DatabaseConnections;
use crate::providers::ItemProvider;
use crate::stores::ItemStore;

/// Creates an in-memory catalog database with all migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Creates an ItemProvider over a fresh store
pub fn setup_test_item_provider() -> ItemProvider {
    ItemProvider::new(Arc::new(ItemStore::new()))
}

/// Creates AppData over a fresh in-memory database
pub async fn setup_test_app_data() -> Arc<AppData> {
    let db = setup_test_db().await;

    Arc::new(AppData::init(DatabaseConnections::from_connection(db)))
}
