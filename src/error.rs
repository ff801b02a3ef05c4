//! Error types for the tabsync registries.

use thiserror::Error;

/// Errors surfaced by a host binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// The binding was never supplied by the integrator
    #[error("Operation not implemented: {0}")]
    NotImplemented(&'static str),

    /// The host answered the call with a failure
    #[error("Host error: {0}")]
    Host(String),
}

/// Crate-level errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Binding error: {0}")]
    Binding(#[from] BindingError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
