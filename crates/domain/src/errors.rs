//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Location violates its kind's invariants
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// Provider identifier is empty or malformed
    #[error("Invalid provider id: {0:?}")]
    InvalidProviderId(String),
}
