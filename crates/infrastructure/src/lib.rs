//! Infrastructure layer - configuration, logging, and provider wiring
//!
//! Turns configuration files and environment variables into a ready
//! [`application::QueryFacade`] backed by HAFAS providers.

pub mod config;
pub mod error;
pub mod providers;
pub mod telemetry;

pub use config::{AppConfig, ENV_PREFIX, ProviderConfig, ServerConfig, default_providers};
pub use error::{ConfigError, SetupError, TelemetryError};
pub use providers::{build_provider_registry, build_query_facade};
pub use telemetry::{LogFormat, TelemetryConfig, init_telemetry};
