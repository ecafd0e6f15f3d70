//! Configuration error types.

use thiserror::Error;

/// Errors while building configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Build(#[from] config::ConfigError),
}

/// Errors from semantic validation of loaded configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid configuration for '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

impl ValidationError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
