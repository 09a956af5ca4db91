//! Transit network provider port
//!
//! A network provider answers trip, departure, and nearby-location queries
//! for one regional or national transit network. Adapters in the integration
//! layer implement this port against concrete upstream APIs.

use async_trait::async_trait;
use domain::{
    DeparturesRequest, NearbyLocationsResult, NearbyRequest, QueryDeparturesResult,
    QueryTripsResult, TripContext, TripRequest,
};
#[cfg(test)]
use mockall::automock;

use crate::error::ProviderError;

/// Identity the gateway presents to upstream services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    /// Value sent as the HTTP `User-Agent`
    pub user_agent: String,
}

impl ClientIdentity {
    /// Create an identity with the given user agent
    #[must_use]
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }
}

impl Default for ClientIdentity {
    fn default() -> Self {
        Self::new(concat!("transit-gateway/", env!("CARGO_PKG_VERSION")))
    }
}

/// Port for a transit network provider
///
/// Implementations hold only static configuration and must be safe to call
/// from many requests at once.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NetworkProvider: Send + Sync {
    /// Apply shared client identity
    ///
    /// Called once by the registry before the provider is used. Calling it
    /// again has no effect.
    fn configure(&self, identity: &ClientIdentity);

    /// Search for trips
    async fn query_trips(&self, request: &TripRequest) -> Result<QueryTripsResult, ProviderError>;

    /// Fetch further trips for a previous search
    ///
    /// `later` selects the direction: `true` for trips after the ones
    /// already returned, `false` for earlier ones.
    async fn query_more_trips(
        &self,
        context: &TripContext,
        later: bool,
    ) -> Result<QueryTripsResult, ProviderError>;

    /// Fetch the departure board of a station
    async fn query_departures(
        &self,
        request: &DeparturesRequest,
    ) -> Result<QueryDeparturesResult, ProviderError>;

    /// Find locations near a point
    async fn query_nearby_locations(
        &self,
        request: &NearbyRequest,
    ) -> Result<NearbyLocationsResult, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn NetworkProvider) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn NetworkProvider>();
    }

    #[test]
    fn default_identity_names_the_gateway() {
        let identity = ClientIdentity::default();
        assert!(identity.user_agent.starts_with("transit-gateway/"));
    }
}
