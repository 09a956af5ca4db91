//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the integration layer implement these ports.

mod network_provider;

#[cfg(test)]
pub use network_provider::MockNetworkProvider;
pub use network_provider::{ClientIdentity, NetworkProvider};
