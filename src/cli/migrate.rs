use crate::config::DatabaseConnections;

/// Run pending migrations on the catalog database
///
/// # Returns
/// * `Ok(())` - Migrations completed successfully
/// * `Err(...)` - Migration failed
pub async fn run_migrations(
    connections: &DatabaseConnections,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running database migrations...");

    connections.migrate().await?;

    tracing::info!("All migrations completed successfully");

    Ok(())
}
