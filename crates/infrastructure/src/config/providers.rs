//! Transit network provider configuration.

use integration_transit::HafasConfig;
use serde::{Deserialize, Serialize};

/// One network provider to register
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Registry id (e.g. `db`, `vbb`)
    pub id: String,

    /// Endpoint settings
    #[serde(flatten)]
    pub hafas: HafasConfig,
}

impl ProviderConfig {
    /// Create a provider entry
    #[must_use]
    pub fn new(id: impl Into<String>, hafas: HafasConfig) -> Self {
        Self {
            id: id.into(),
            hafas,
        }
    }
}

/// Providers registered when none are configured
///
/// Deutsche Bahn comes first and is therefore the default.
#[must_use]
pub fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new("db", HafasConfig::db()),
        ProviderConfig::new("vbb", HafasConfig::vbb()),
        ProviderConfig::new("bvg", HafasConfig::bvg()),
    ]
}
