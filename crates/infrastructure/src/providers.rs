//! Wiring of configured providers into the query facade

use std::sync::Arc;

use application::{ClientIdentity, ProviderRegistry, QueryFacade};
use integration_transit::HafasProvider;
use tracing::info;

use crate::config::AppConfig;
use crate::error::SetupError;

/// Build the provider registry described by the configuration
///
/// # Errors
///
/// Returns an error if a provider cannot be created or the registry
/// rejects the registrations.
pub fn build_provider_registry(config: &AppConfig) -> Result<ProviderRegistry, SetupError> {
    let mut builder = ProviderRegistry::builder();

    for entry in &config.providers {
        let provider =
            HafasProvider::new(entry.hafas.clone()).map_err(|source| SetupError::Provider {
                id: entry.id.clone(),
                source,
            })?;
        info!(
            id = %entry.id,
            base_url = %entry.hafas.base_url,
            profile = %entry.hafas.profile,
            "Registering network provider"
        );
        builder = builder.register(entry.id.clone(), Arc::new(provider));
    }

    if let Some(default) = &config.default_provider {
        builder = builder.default_provider(default.clone());
    }
    if let Some(user_agent) = &config.user_agent {
        builder = builder.client_identity(ClientIdentity::new(user_agent.clone()));
    }

    Ok(builder.build()?)
}

/// Build the query facade over all configured providers
///
/// # Errors
///
/// See [`build_provider_registry`].
pub fn build_query_facade(config: &AppConfig) -> Result<QueryFacade, SetupError> {
    let registry = build_provider_registry(config)?;
    Ok(QueryFacade::new(Arc::new(registry)).with_limits(config.limits))
}

#[cfg(test)]
mod tests {
    use application::RegistryError;
    use integration_transit::HafasConfig;

    use super::*;
    use crate::config::ProviderConfig;

    #[test]
    fn default_config_builds_registry() {
        let registry = build_provider_registry(&AppConfig::default()).unwrap();
        assert_eq!(registry.provider_ids(), ["db", "vbb", "bvg"]);
        assert_eq!(registry.default_id().as_str(), "db");
    }

    #[test]
    fn configured_default_is_used() {
        let config = AppConfig {
            default_provider: Some("vbb".to_string()),
            ..AppConfig::default()
        };
        let registry = build_provider_registry(&config).unwrap();
        assert_eq!(registry.default_id().as_str(), "vbb");
    }

    #[test]
    fn invalid_endpoint_names_the_provider() {
        let config = AppConfig {
            providers: vec![ProviderConfig::new(
                "broken",
                HafasConfig::for_testing("not a url"),
            )],
            ..AppConfig::default()
        };
        let err = build_provider_registry(&config).unwrap_err();
        assert!(matches!(err, SetupError::Provider { ref id, .. } if id == "broken"));
    }

    #[test]
    fn blank_id_is_rejected_by_registry() {
        let config = AppConfig {
            providers: vec![ProviderConfig::new("  ", HafasConfig::db())],
            ..AppConfig::default()
        };
        let err = build_provider_registry(&config).unwrap_err();
        assert!(matches!(
            err,
            SetupError::Registry(RegistryError::InvalidId(_))
        ));
    }

    #[test]
    fn facade_carries_limits() {
        let mut config = AppConfig::default();
        config.limits.max_departures = 25;
        let facade = build_query_facade(&config).unwrap();
        assert_eq!(facade.limits().max_departures, 25);
        assert_eq!(facade.list_provider_ids().len(), 3);
    }
}
