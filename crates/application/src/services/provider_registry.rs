//! Provider registry - the fixed set of transit networks the gateway serves
//!
//! Built once at startup and read-only afterwards. Resolution never fails:
//! unknown or absent ids fall back to the default provider.

use std::{collections::HashMap, fmt, sync::Arc};

use domain::ProviderId;
use tracing::{debug, info};

use crate::{
    error::RegistryError,
    ports::{ClientIdentity, NetworkProvider},
};

/// Immutable mapping from provider id to provider instance
pub struct ProviderRegistry {
    entries: Vec<(ProviderId, Arc<dyn NetworkProvider>)>,
    index: HashMap<ProviderId, usize>,
    default_index: usize,
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("ids", &self.provider_ids())
            .field("default", &self.default_id())
            .finish_non_exhaustive()
    }
}

impl ProviderRegistry {
    /// Start building a registry
    #[must_use]
    pub fn builder() -> ProviderRegistryBuilder {
        ProviderRegistryBuilder::default()
    }

    /// All registered ids in registration order
    #[must_use]
    pub fn provider_ids(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(id, _)| id.to_string())
            .collect()
    }

    /// Id of the default provider
    #[must_use]
    pub fn default_id(&self) -> &ProviderId {
        &self.entries[self.default_index].0
    }

    /// Number of registered providers
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a built registry holds at least one provider
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a provider by exact id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<dyn NetworkProvider>> {
        self.index.get(id).map(|&i| &self.entries[i].1)
    }

    /// Resolve an id to a provider, falling back to the default
    #[must_use]
    pub fn resolve(&self, id: Option<&str>) -> &Arc<dyn NetworkProvider> {
        self.resolve_with_id(id).1
    }

    /// Resolve an id to the matching entry, falling back to the default
    #[must_use]
    pub fn resolve_with_id(&self, id: Option<&str>) -> (&ProviderId, &Arc<dyn NetworkProvider>) {
        let index = match id {
            Some(requested) => self.index.get(requested).copied().unwrap_or_else(|| {
                debug!(
                    requested,
                    default = %self.default_id(),
                    "Unknown provider id, using default"
                );
                self.default_index
            }),
            None => self.default_index,
        };
        let (id, provider) = &self.entries[index];
        (id, provider)
    }
}

/// Builder for [`ProviderRegistry`]
#[derive(Default)]
pub struct ProviderRegistryBuilder {
    entries: Vec<(String, Arc<dyn NetworkProvider>)>,
    default_id: Option<String>,
    identity: Option<ClientIdentity>,
}

impl fmt::Debug for ProviderRegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistryBuilder")
            .field(
                "ids",
                &self.entries.iter().map(|(id, _)| id).collect::<Vec<_>>(),
            )
            .field("default_id", &self.default_id)
            .field("identity", &self.identity)
            .finish()
    }
}

impl ProviderRegistryBuilder {
    /// Register a provider under an id
    #[must_use]
    pub fn register(mut self, id: impl Into<String>, provider: Arc<dyn NetworkProvider>) -> Self {
        self.entries.push((id.into(), provider));
        self
    }

    /// Choose the default provider (the first registered one otherwise)
    #[must_use]
    pub fn default_provider(mut self, id: impl Into<String>) -> Self {
        self.default_id = Some(id.into());
        self
    }

    /// Identity every provider is configured with
    #[must_use]
    pub fn client_identity(mut self, identity: ClientIdentity) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Validate the registrations and configure each provider once
    ///
    /// # Errors
    ///
    /// Returns an error if nothing was registered, an id is invalid or
    /// duplicated, or the default id is not registered.
    pub fn build(self) -> Result<ProviderRegistry, RegistryError> {
        if self.entries.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut entries = Vec::with_capacity(self.entries.len());
        let mut index = HashMap::with_capacity(self.entries.len());
        for (raw_id, provider) in self.entries {
            let id = ProviderId::parse(raw_id)?;
            if index.insert(id.clone(), entries.len()).is_some() {
                return Err(RegistryError::DuplicateId(id.to_string()));
            }
            entries.push((id, provider));
        }

        let default_index = match self.default_id {
            Some(default_id) => *index
                .get(default_id.as_str())
                .ok_or(RegistryError::UnknownDefault(default_id))?,
            None => 0,
        };

        let identity = self.identity.unwrap_or_default();
        for (_, provider) in &entries {
            provider.configure(&identity);
        }

        let registry = ProviderRegistry {
            entries,
            index,
            default_index,
        };
        info!(
            providers = ?registry.provider_ids(),
            default = %registry.default_id(),
            user_agent = %identity.user_agent,
            "Provider registry ready"
        );
        Ok(registry)
    }
}
