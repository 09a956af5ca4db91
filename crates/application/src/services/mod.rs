//! Application services - Use case implementations

mod provider_registry;
mod query_facade;
mod query_outcome;

pub use provider_registry::{ProviderRegistry, ProviderRegistryBuilder};
pub use query_facade::{QueryFacade, QueryLimits};
pub use query_outcome::QueryOutcome;
