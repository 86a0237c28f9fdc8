use std::fmt;
use std::sync::Arc;

use crate::config::config_spec::ConfigSpec;
use crate::config::errors::ApplicationError;
use crate::config::EnvironmentProvider;

/// Deployment environment, read from `APP_ENV`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Production,
    Test,
}

impl AppEnvironment {
    fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(format!(
                "Expected one of development, production, test; got '{}'",
                other
            )),
        }
    }

    fn validate(value: &str) -> Result<(), String> {
        Self::parse(value).map(|_| ())
    }
}

/// Bootstrap settings for infrastructure configuration
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    api_prefix: String,
    cors_origins: Vec<String>,
    environment: AppEnvironment,
}

impl BootstrapSettings {
    /// Load bootstrap settings through the given environment provider
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, ApplicationError> {
        let database_url_spec = ConfigSpec::new(env_provider.clone())
            .env_override("DATABASE_URL")
            .default_value("sqlite://catalog.db?mode=rwc")
            .min_length(1);

        let host_spec = ConfigSpec::new(env_provider.clone())
            .env_override("HOST")
            .default_value("0.0.0.0")
            .validator(ConfigSpec::validate_host_address);

        let port_spec = ConfigSpec::new(env_provider.clone())
            .env_override("PORT")
            .default_value("3333")
            .validator(|value| ConfigSpec::validate_port_range(value, 1, 65535));

        let api_prefix_spec = ConfigSpec::new(env_provider.clone())
            .env_override("API_PREFIX")
            .default_value("/api/teceo")
            .validator(ConfigSpec::validate_path_prefix);

        let cors_spec = ConfigSpec::new(env_provider.clone())
            .env_override("CORS_ORIGIN")
            .default_value("*")
            .min_length(1);

        let environment_spec = ConfigSpec::new(env_provider)
            .env_override("APP_ENV")
            .default_value("development")
            .validator(AppEnvironment::validate);

        let database_url = database_url_spec.load_setting_with_source()?.value;
        let server_host = host_spec.load_setting_with_source()?.value;
        let port_value = port_spec.load_setting_with_source()?.value;
        let server_port = ConfigSpec::parse_port(&port_value, "PORT")?;
        let api_prefix = api_prefix_spec.load_setting_with_source()?.value;
        let cors_origins = ConfigSpec::parse_list(&cors_spec.load_setting_with_source()?.value);
        let environment_value = environment_spec.load_setting_with_source()?.value;
        let environment = AppEnvironment::parse(&environment_value).map_err(|error| {
            ApplicationError::ParseError {
                setting_name: "APP_ENV".to_string(),
                error,
            }
        })?;

        Ok(Self {
            database_url,
            server_host,
            server_port,
            api_prefix,
            cors_origins,
            environment,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ApplicationError> {
        use crate::config::SystemEnvironment;
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    /// Allowed CORS origins; a single `*` allows any origin
    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|origin| origin == "*")
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Swagger UI is served everywhere except production
    pub fn swagger_enabled(&self) -> bool {
        self.environment != AppEnvironment::Production
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("api_prefix", &self.api_prefix)
            .field("cors_origins", &self.cors_origins)
            .field("environment", &self.environment)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;
    use std::collections::HashMap;

    fn create_test_env(vars: &[(&str, &str)]) -> Arc<MockEnvironment> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Arc::new(MockEnvironment::new(vars))
    }

    #[test]
    fn test_bootstrap_settings_with_all_vars() {
        let env_provider = create_test_env(&[
            ("DATABASE_URL", "sqlite://test.db"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("API_PREFIX", "/api/v1"),
            ("CORS_ORIGIN", "http://localhost:3000,http://admin.local"),
            ("APP_ENV", "production"),
        ]);

        let settings = BootstrapSettings::from_env_provider(env_provider).unwrap();

        assert_eq!(settings.database_url(), "sqlite://test.db");
        assert_eq!(settings.server_address(), "127.0.0.1:8080");
        assert_eq!(settings.api_prefix(), "/api/v1");
        assert_eq!(
            settings.cors_origins(),
            &["http://localhost:3000".to_string(), "http://admin.local".to_string()]
        );
        assert!(!settings.allows_any_origin());
        assert_eq!(settings.environment(), AppEnvironment::Production);
        assert!(!settings.swagger_enabled());
    }

    #[test]
    fn test_bootstrap_settings_with_defaults() {
        let settings = BootstrapSettings::from_env_provider(create_test_env(&[])).unwrap();

        assert_eq!(settings.database_url(), "sqlite://catalog.db?mode=rwc");
        assert_eq!(settings.server_host(), "0.0.0.0");
        assert_eq!(settings.server_port(), 3333);
        assert_eq!(settings.api_prefix(), "/api/teceo");
        assert!(settings.allows_any_origin());
        assert_eq!(settings.environment(), AppEnvironment::Development);
        assert!(settings.swagger_enabled());
    }

    #[test]
    fn test_bootstrap_settings_empty_database_url_fails_validation() {
        let result = BootstrapSettings::from_env_provider(create_test_env(&[("DATABASE_URL", "")]));

        match result.unwrap_err() {
            ApplicationError::InvalidSetting { setting_name, reason } => {
                assert_eq!(setting_name, "DATABASE_URL");
                assert!(reason.contains("must be at least 1 characters long"));
            }
            other => panic!("Expected InvalidSetting for DATABASE_URL, got: {:?}", other),
        }
    }

    #[test]
    fn test_bootstrap_settings_invalid_port_fails() {
        let result = BootstrapSettings::from_env_provider(create_test_env(&[("PORT", "not-a-port")]));

        match result.unwrap_err() {
            ApplicationError::InvalidSetting { setting_name, .. } => {
                assert_eq!(setting_name, "PORT");
            }
            other => panic!("Expected InvalidSetting for PORT, got: {:?}", other),
        }
    }

    #[test]
    fn test_bootstrap_settings_invalid_prefix_fails() {
        let result =
            BootstrapSettings::from_env_provider(create_test_env(&[("API_PREFIX", "api/teceo")]));

        assert!(matches!(
            result,
            Err(ApplicationError::InvalidSetting { ref setting_name, .. }) if setting_name == "API_PREFIX"
        ));
    }

    #[test]
    fn test_bootstrap_settings_unknown_environment_fails() {
        let result = BootstrapSettings::from_env_provider(create_test_env(&[("APP_ENV", "staging")]));

        assert!(result.is_err());
    }
}
