//! Value Objects - Immutable, identity-less domain primitives

mod location;
mod point;
mod provider_id;

pub use location::{Location, LocationKind};
pub use point::Point;
pub use provider_id::ProviderId;
