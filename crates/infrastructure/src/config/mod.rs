//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `providers`: transit network provider endpoints
//!
//! Values are layered: built-in defaults, then an optional `config.toml`,
//! then `TRANSIT_GATEWAY_*` environment variables. Nested keys use a double
//! underscore, e.g. `TRANSIT_GATEWAY_SERVER__PORT=8080` or
//! `TRANSIT_GATEWAY_DEFAULT_PROVIDER=vbb`.

mod providers;
mod server;

use std::collections::HashSet;

use application::QueryLimits;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::telemetry::TelemetryConfig;

pub use providers::{ProviderConfig, default_providers};
pub use server::ServerConfig;

/// Prefix of environment variables that override configuration values
pub const ENV_PREFIX: &str = "TRANSIT_GATEWAY";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// User agent presented to upstream services
    ///
    /// Falls back to `transit-gateway/<version>` when unset.
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Provider used when a request names none or an unknown one
    ///
    /// Falls back to the first configured provider when unset.
    #[serde(default)]
    pub default_provider: Option<String>,

    /// Registered network providers, in registration order
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,

    /// Bounds for departure and nearby-station queries
    #[serde(default)]
    pub limits: QueryLimits,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            telemetry: TelemetryConfig::default(),
            user_agent: None,
            default_provider: None,
            providers: default_providers(),
            limits: QueryLimits::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or deserialized.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config", false)
    }

    /// Load configuration from the given file and the environment
    ///
    /// The file extension may be omitted. With `required` set, a missing
    /// file is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or deserialized, or the
    /// result fails validation.
    pub fn load_from(path: &str, required: bool) -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 25333)?
            // Load from file if exists
            .add_source(config::File::with_name(path).required(required))
            // Override with environment variables (e.g., TRANSIT_GATEWAY_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        debug!(
            providers = config.providers.len(),
            port = config.server.port,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if no provider is configured, provider ids repeat,
    /// the default provider is not among them, or an endpoint is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.providers.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one provider must be configured".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(self.providers.len());
        for provider in &self.providers {
            if !seen.insert(provider.id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "provider id '{}' is configured twice",
                    provider.id
                )));
            }
            provider
                .hafas
                .validate()
                .map_err(|e| ConfigError::Invalid(format!("provider '{}': {e}", provider.id)))?;
        }

        if let Some(default) = self
            .default_provider
            .as_deref()
            .filter(|id| !seen.contains(id))
        {
            return Err(ConfigError::Invalid(format!(
                "default provider '{default}' is not configured"
            )));
        }

        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must not be 0".to_string()));
        }

        Ok(())
    }
}
