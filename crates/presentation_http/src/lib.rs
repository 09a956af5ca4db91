//! Transit gateway HTTP presentation layer
//!
//! Exposes the query facade to out-of-process callers as a small JSON API.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use routes::{create_router, create_router_with_body_limit};
pub use server::{ShutdownOutcome, serve_with_shutdown};
pub use state::AppState;
