//! Listener, logging and CORS settings for the relay.

use serde::Deserialize;
use std::net::SocketAddr;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Comma-separated browser origins allowed to reach `/ws` and `/api`.
    /// Any origin is allowed when unset.
    pub cors_origins: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ValidationError::InvalidBindAddress(addr))
    }

    /// Production switches logs to JSON.
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .iter()
            .flat_map(|raw| raw.split(','))
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        self.socket_addr().map(|_| ())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: Environment::Development,
            log_level: "info,consult_relay=debug".to_string(),
            cors_origins: None,
        }
    }
}
