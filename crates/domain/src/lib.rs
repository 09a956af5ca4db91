//! Domain layer for the transit gateway
//!
//! Contains the value objects and result types shared by every transit
//! network provider. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
