//! Infrastructure error types

use application::{ProviderError, RegistryError};
use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration source could not be read or deserialized
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Configuration values are inconsistent
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors raised while wiring providers into a registry
#[derive(Debug, Error)]
pub enum SetupError {
    /// A provider could not be constructed
    #[error("provider '{id}' could not be created: {source}")]
    Provider {
        /// Configured provider id
        id: String,
        /// Underlying error
        source: ProviderError,
    },

    /// The registry rejected the registrations
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors raised while installing the tracing subscriber
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The log filter directive is malformed
    #[error("invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed
    #[error("failed to install tracing subscriber: {0}")]
    Init(String),
}
