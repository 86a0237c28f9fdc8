mod bootstrap_settings;
mod config_spec;
mod database;
mod env_provider;
mod errors;
mod logging;

pub use bootstrap_settings::{AppEnvironment, BootstrapSettings};
pub use config_spec::{ConfigSpec, ConfigValue, ConfigValueSource};
pub use database::{migrate_database, DatabaseConnections};
pub use env_provider::{EnvironmentProvider, SystemEnvironment};
pub use errors::ApplicationError;
pub use logging::{init_logging, LoggingConfig, LoggingError};

#[cfg(test)]
pub use env_provider::MockEnvironment;
