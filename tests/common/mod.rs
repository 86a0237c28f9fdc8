// Common test utilities for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use catalog_backend::config::{BootstrapSettings, DatabaseConnections, EnvironmentProvider};
use catalog_backend::providers::ItemProvider;
use catalog_backend::stores::ItemStore;
use catalog_backend::AppData;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

/// Creates an in-memory catalog database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Creates a test database and an ItemProvider over it
pub async fn setup_item_provider() -> (DatabaseConnection, ItemProvider) {
    let db = setup_test_db().await;
    let provider = ItemProvider::new(Arc::new(ItemStore::new()));
    (db, provider)
}

/// Creates AppData over a fresh in-memory database
pub async fn setup_app_data() -> Arc<AppData> {
    let db = setup_test_db().await;
    Arc::new(AppData::init(DatabaseConnections::from_connection(db)))
}

/// Fixed set of variables standing in for the process environment
pub struct TestEnvironment {
    vars: HashMap<String, String>,
}

impl TestEnvironment {
    pub fn new(vars: &[(&str, &str)]) -> Self {
        Self {
            vars: vars
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl EnvironmentProvider for TestEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Bootstrap settings for tests: default prefix, test environment
pub fn test_settings() -> BootstrapSettings {
    BootstrapSettings::from_env_provider(Arc::new(TestEnvironment::new(&[("APP_ENV", "test")])))
        .expect("Failed to load test settings")
}

/// Wait long enough for the next row to get a later `created_at`
pub async fn next_millisecond() {
    tokio::time::sleep(Duration::from_millis(3)).await;
}
