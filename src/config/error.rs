//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("Reply delay exceeds maximum allowed (60000 ms)")]
    ReplyDelayTooLong,

    #[error("Room channel capacity must be between 1 and 4096")]
    InvalidChannelCapacity,
}
