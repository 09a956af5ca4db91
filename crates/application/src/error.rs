//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Failures a transit network provider can signal
///
/// The query facade never lets these escape; they exist so providers can
/// report precisely what went wrong and the facade can log it.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Upstream could not be reached
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Upstream did not answer in time
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The configured timeout in seconds
        timeout_secs: u64,
    },

    /// Upstream rejected the request because of rate limiting
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying (if provided by upstream)
        retry_after_secs: Option<u64>,
    },

    /// Upstream answered with a non-success status
    #[error("Upstream returned HTTP {status}")]
    UpstreamStatus {
        /// HTTP status code
        status: u16,
    },

    /// Upstream answer could not be interpreted
    #[error("Parse error: {0}")]
    Parse(String),

    /// The request or context is inconsistent with the provider's state
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// Upstream answer lacked data the contract requires
    #[error("Missing data: {0}")]
    MissingData(String),
}

/// Errors raised while assembling a provider registry
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No provider was registered
    #[error("At least one provider must be registered")]
    Empty,

    /// The same id was registered twice
    #[error("Provider id registered twice: {0}")]
    DuplicateId(String),

    /// The requested default id is not registered
    #[error("Default provider {0:?} is not registered")]
    UnknownDefault(String),

    /// An id is not a valid provider id
    #[error(transparent)]
    InvalidId(#[from] DomainError),
}
