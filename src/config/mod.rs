//! Application configuration module
//!
//! Provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with
//! the `HORECA_RELAY_` prefix and nested values use double underscores as
//! separators. The plain `PORT` and `CORS_ORIGIN` variables are honored as
//! overrides for parity with the deployment environment.
//!
//! # Example
//!
//! ```no_run
//! use horeca_relay::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod server;

pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, CORS, heartbeat)
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `HORECA_RELAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Applies plain `PORT` / `CORS_ORIGIN` overrides
    ///
    /// # Environment Variable Format
    ///
    /// - `HORECA_RELAY__SERVER__PORT=3001` -> `server.port = 3001`
    /// - `HORECA_RELAY__SERVER__HEARTBEAT_INTERVAL_SECS=30`
    /// - `PORT=8080` -> `server.port = 8080` (deployment override)
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HORECA_RELAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidPortOverride(port))?;
        }
        if let Ok(origin) = std::env::var("CORS_ORIGIN") {
            config.server.cors_origin = origin;
        }

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("HORECA_RELAY__SERVER__PORT");
        env::remove_var("HORECA_RELAY__SERVER__HEARTBEAT_INTERVAL_SECS");
        env::remove_var("HORECA_RELAY__SERVER__ENVIRONMENT");
        env::remove_var("PORT");
        env::remove_var("CORS_ORIGIN");
    }

    #[test]
    fn test_load_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let config = AppConfig::load().unwrap();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.cors_origin, "http://localhost:5173");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_prefixed_variables_set_nested_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("HORECA_RELAY__SERVER__PORT", "4000");
        env::set_var("HORECA_RELAY__SERVER__HEARTBEAT_INTERVAL_SECS", "15");

        let config = AppConfig::load().unwrap();
        clear_env();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.heartbeat_interval_secs, 15);
    }

    #[test]
    fn test_plain_port_and_cors_origin_override() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("HORECA_RELAY__SERVER__PORT", "4000");
        env::set_var("PORT", "9000");
        env::set_var("CORS_ORIGIN", "https://floor.example.com");

        let config = AppConfig::load().unwrap();
        clear_env();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.cors_origin, "https://floor.example.com");
    }

    #[test]
    fn test_invalid_port_override_is_an_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("PORT", "not-a-port");

        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::InvalidPortOverride(_))));
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("HORECA_RELAY__SERVER__ENVIRONMENT", "production");

        let config = AppConfig::load().unwrap();
        clear_env();

        assert!(config.is_production());
    }
}
