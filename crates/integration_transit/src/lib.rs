//! HAFAS network providers for the transit gateway
//!
//! Talks to the public [transport.rest](https://v6.db.transport.rest) v6
//! deployments (Deutsche Bahn, VBB, BVG), which front the HAFAS backends of
//! the respective operators.
//!
//! # Example
//!
//! ```rust,ignore
//! use application::ProviderRegistry;
//! use integration_transit::{HafasConfig, HafasProvider};
//!
//! let registry = ProviderRegistry::builder()
//!     .register("db", Arc::new(HafasProvider::new(HafasConfig::db())?))
//!     .register("vbb", Arc::new(HafasProvider::new(HafasConfig::vbb())?))
//!     .default_provider("db")
//!     .build()?;
//! ```

mod config;
mod provider;
mod raw;

pub use config::{HafasConfig, HafasProfile};
pub use provider::HafasProvider;
