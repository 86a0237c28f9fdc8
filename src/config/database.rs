use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::config::BootstrapSettings;
use crate::errors::InternalError;

/// Owns the connection pool for the catalog database
#[derive(Clone)]
pub struct DatabaseConnections {
    pub catalog: DatabaseConnection,
}

impl DatabaseConnections {
    /// Connect to the catalog database
    ///
    /// Does NOT run migrations - call `migrate()` separately.
    pub async fn init(bootstrap_settings: &BootstrapSettings) -> Result<Self, InternalError> {
        let database_url = bootstrap_settings.database_url();

        let catalog = Database::connect(database_url)
            .await
            .map_err(|e| InternalError::database("connect_database", e))?;

        tracing::debug!("Connected to catalog database: {}", database_url);

        Ok(Self { catalog })
    }

    /// Wrap an existing connection, used by tests with in-memory databases
    pub fn from_connection(catalog: DatabaseConnection) -> Self {
        Self { catalog }
    }

    pub async fn migrate(&self) -> Result<(), InternalError> {
        migrate_database(&self.catalog).await
    }
}

/// Run all pending migrations on the catalog database
pub async fn migrate_database(db: &DatabaseConnection) -> Result<(), InternalError> {
    Migrator::up(db, None)
        .await
        .map_err(|e| InternalError::database("run_migrations", e))?;

    tracing::debug!("Catalog database migrations completed");

    Ok(())
}
