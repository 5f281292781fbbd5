//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CONSULT_RELAY_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use consult_relay::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod error;
mod server;
mod simulation;

pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use simulation::SimulationConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// service. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Simulated patient timing and randomness
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CONSULT_RELAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CONSULT_RELAY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CONSULT_RELAY__SIMULATION__SEED=7` -> `simulation.seed = Some(7)`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CONSULT_RELAY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.simulation.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "CONSULT_RELAY__SERVER__PORT",
        "CONSULT_RELAY__SERVER__ENVIRONMENT",
        "CONSULT_RELAY__SIMULATION__SEED",
        "CONSULT_RELAY__SIMULATION__GREETING_DELAY_MS",
        "CONSULT_RELAY__SIMULATION__ROOM_CHANNEL_CAPACITY",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.simulation.greeting_delay_ms, 400);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CONSULT_RELAY__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_values_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CONSULT_RELAY__SERVER__PORT", "8080");
        env::set_var("CONSULT_RELAY__SIMULATION__SEED", "7");
        env::set_var("CONSULT_RELAY__SIMULATION__GREETING_DELAY_MS", "50");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.simulation.greeting_delay_ms, 50);
    }

    #[test]
    fn test_validate_rejects_bad_simulation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CONSULT_RELAY__SIMULATION__ROOM_CHANNEL_CAPACITY", "0");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidChannelCapacity)
        );
    }
}
