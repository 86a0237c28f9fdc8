use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use poem::{listener::TcpListener, Server};

use catalog_backend::cli::{execute_command, Cli, Commands};
use catalog_backend::config::{
    init_logging, BootstrapSettings, DatabaseConnections, LoggingConfig, SystemEnvironment,
};
use catalog_backend::server::{build_app, shutdown_signal, DOCS_PATH};
use catalog_backend::AppData;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let logging_config = LoggingConfig::from_env_provider(&SystemEnvironment);
    init_logging(&logging_config)?;

    let settings = BootstrapSettings::from_env()?;
    tracing::debug!("Loaded settings: {:?}", settings);

    let connections = DatabaseConnections::init(&settings).await?;

    let command = cli.command();
    if command == Commands::Migrate {
        let app_data = AppData::init(connections);
        return execute_command(command, &app_data).await;
    }

    connections.migrate().await?;
    tracing::info!("Database ready");

    if let Commands::Seed(_) = command {
        let app_data = AppData::init(connections);
        return execute_command(command, &app_data).await;
    }

    let app_data = Arc::new(AppData::init(connections));
    let app = build_app(app_data, &settings);

    let address = settings.server_address();
    tracing::info!("Starting server on http://{}", address);
    tracing::info!("API endpoints available at {}", settings.api_prefix());
    if settings.swagger_enabled() {
        tracing::info!("Swagger UI available at {}", DOCS_PATH);
    }

    Server::new(TcpListener::bind(address))
        .run_with_graceful_shutdown(app, shutdown_signal(), Some(Duration::from_secs(10)))
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}
