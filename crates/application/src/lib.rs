//! Application layer - Use cases and orchestration
//!
//! Defines the transit network provider port and the services built on it:
//! the provider registry and the query facade.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ProviderError, RegistryError};
pub use ports::*;
pub use services::*;
