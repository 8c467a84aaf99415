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
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Power iteration tolerance must be positive and finite, got {0}")]
    InvalidPowerTolerance(f64),

    #[error("Power iteration needs at least one iteration")]
    InvalidIterationLimit,

    #[error("Invalid log filter '{0}'")]
    InvalidLogFilter(String),
}
