//! Query facade - provider-agnostic transit queries
//!
//! Resolves a provider through the [`ProviderRegistry`], issues the query,
//! and collapses every provider failure into [`QueryOutcome::NoResult`].
//! Failures are logged for operators but never returned to the caller.

use std::{fmt, sync::Arc};

use chrono::{TimeDelta, Utc};
use domain::{
    Accessibility, DeparturesRequest, Location, LocationKind, NearbyLocationsResult,
    NearbyRequest, Optimize, Point, Product, QueryDeparturesResult, QueryTripsResult,
    TripOptions, TripRequest, WalkSpeed,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::{ProviderRegistry, QueryOutcome};

/// Bounds applied to departure and nearby-station queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryLimits {
    /// Maximum departures per board
    #[serde(default = "default_max_departures")]
    pub max_departures: u16,

    /// Search radius for nearby stations in meters
    #[serde(default = "default_nearby_max_distance_m")]
    pub nearby_max_distance_m: u32,

    /// Maximum nearby stations returned
    #[serde(default = "default_nearby_max_locations")]
    pub nearby_max_locations: u16,
}

const fn default_max_departures() -> u16 {
    100
}

const fn default_nearby_max_distance_m() -> u32 {
    250
}

const fn default_nearby_max_locations() -> u16 {
    10
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            max_departures: default_max_departures(),
            nearby_max_distance_m: default_nearby_max_distance_m(),
            nearby_max_locations: default_nearby_max_locations(),
        }
    }
}

/// Facade over all registered transit network providers
pub struct QueryFacade {
    registry: Arc<ProviderRegistry>,
    limits: QueryLimits,
}

impl fmt::Debug for QueryFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryFacade")
            .field("registry", &self.registry)
            .field("limits", &self.limits)
            .finish()
    }
}

impl QueryFacade {
    /// Create a facade with default limits
    #[must_use]
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            limits: QueryLimits::default(),
        }
    }

    /// Override the query limits
    #[must_use]
    pub const fn with_limits(mut self, limits: QueryLimits) -> Self {
        self.limits = limits;
        self
    }

    /// The registry this facade resolves providers from
    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// The active query limits
    #[must_use]
    pub const fn limits(&self) -> QueryLimits {
        self.limits
    }

    /// Ids of all supported providers, in registration order
    #[must_use]
    pub fn list_provider_ids(&self) -> Vec<String> {
        self.registry.provider_ids()
    }

    /// Build an unlabelled address location from raw coordinates
    #[must_use]
    pub const fn make_address_location(latitude: f64, longitude: f64) -> Location {
        Location::address(None, Some(Point::new(latitude, longitude)))
    }

    /// Options used for every connection search
    fn connection_options() -> TripOptions {
        TripOptions {
            products: Product::ALL.to_vec(),
            optimize: Optimize::LeastChanges,
            walk_speed: WalkSpeed::Slow,
            accessibility: Accessibility::Neutral,
        }
    }

    /// Calculate connections departing `departure_delay_minutes` from now
    ///
    /// If the provider reports that more trips are available, one
    /// continuation query is issued and its trips are appended. A failed
    /// continuation leaves the primary result intact.
    #[instrument(skip(self, from, to), fields(from = %from, to = %to))]
    pub async fn calculate_connection(
        &self,
        provider_id: Option<&str>,
        from: Location,
        to: Location,
        departure_delay_minutes: i32,
    ) -> QueryOutcome<QueryTripsResult> {
        let (id, provider) = self.registry.resolve_with_id(provider_id);
        let departure = Utc::now() + TimeDelta::minutes(i64::from(departure_delay_minutes));
        let request = TripRequest {
            from,
            via: None,
            to,
            time: departure,
            departure: true,
            options: Self::connection_options(),
        };

        let primary = match provider.query_trips(&request).await {
            Ok(result) => result,
            Err(e) => {
                warn!(provider = %id, error = %e, "Trip query failed");
                return QueryOutcome::NoResult;
            },
        };

        let Some(context) = primary.context.as_ref() else {
            warn!(provider = %id, "Trip result has no continuation context");
            return QueryOutcome::NoResult;
        };

        if !context.can_query_later() {
            debug!(provider = %id, trips = primary.trips.len(), "Trips found");
            return QueryOutcome::Found(primary);
        }

        match provider.query_more_trips(context, true).await {
            Ok(later) => {
                let merged = primary.followed_by(later);
                debug!(
                    provider = %id,
                    primary = primary.trips.len(),
                    total = merged.trips.len(),
                    "Trips found including continuation"
                );
                QueryOutcome::Found(merged)
            },
            Err(e) => {
                warn!(
                    provider = %id,
                    error = %e,
                    "Continuation query failed, returning primary trips"
                );
                QueryOutcome::Found(primary)
            },
        }
    }

    /// Departure board of a station, starting now
    #[instrument(skip(self))]
    pub async fn get_departures(
        &self,
        provider_id: Option<&str>,
        station_id: &str,
    ) -> QueryOutcome<QueryDeparturesResult> {
        let (id, provider) = self.registry.resolve_with_id(provider_id);
        let request = DeparturesRequest {
            station_id: station_id.to_string(),
            time: Utc::now(),
            max_departures: self.limits.max_departures,
            include_arrivals: false,
        };

        match provider.query_departures(&request).await {
            Ok(result) => {
                debug!(provider = %id, departures = result.departure_count(), "Departures found");
                QueryOutcome::Found(result)
            },
            Err(e) => {
                warn!(provider = %id, %station_id, error = %e, "Departures query failed");
                QueryOutcome::NoResult
            },
        }
    }

    /// Stations near a coordinate
    #[instrument(skip(self))]
    pub async fn get_nearest_stations(
        &self,
        provider_id: Option<&str>,
        latitude: f64,
        longitude: f64,
    ) -> QueryOutcome<NearbyLocationsResult> {
        let (id, provider) = self.registry.resolve_with_id(provider_id);
        let request = NearbyRequest {
            types: vec![LocationKind::Station],
            location: Location::coord(latitude, longitude),
            max_distance_m: self.limits.nearby_max_distance_m,
            max_locations: self.limits.nearby_max_locations,
        };

        match provider.query_nearby_locations(&request).await {
            Ok(result) => {
                debug!(provider = %id, stations = result.locations.len(), "Nearby stations found");
                QueryOutcome::Found(result)
            },
            Err(e) => {
                warn!(provider = %id, error = %e, "Nearby stations query failed");
                QueryOutcome::NoResult
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use domain::{
        Departure, Leg, NearbyLocation, StationDepartures, Trip, TripContext,
    };

    use super::*;
    use crate::{
        error::ProviderError,
        ports::{MockNetworkProvider, NetworkProvider},
    };

    fn trip(id: &str) -> Trip {
        let dep = Utc.with_ymd_and_hms(2026, 2, 11, 8, 0, 0).unwrap();
        let arr = Utc.with_ymd_and_hms(2026, 2, 11, 8, 25, 0).unwrap();
        Trip {
            id: Some(id.to_string()),
            legs: vec![Leg {
                origin: Location::station("900100003", Some("Alexanderplatz".to_string()), None),
                destination: Location::station("900023201", Some("Zoo".to_string()), None),
                departure: dep,
                planned_departure: dep,
                arrival: arr,
                planned_arrival: arr,
                departure_delay_secs: Some(0),
                arrival_delay_secs: None,
                departure_platform: None,
                arrival_platform: None,
                line: None,
                walking: false,
                distance_m: None,
            }],
        }
    }

    fn trips_result(ids: &[&str], later_ref: Option<&str>) -> QueryTripsResult {
        let request = TripRequest::departing(
            Location::coord(52.52, 13.41),
            Location::coord(52.50, 13.33),
            Utc::now(),
        );
        QueryTripsResult::new(
            ids.iter().map(|id| trip(id)).collect(),
            Some(TripContext::new(request, None, later_ref.map(str::to_string))),
        )
    }

    fn trip_ids(result: &QueryTripsResult) -> Vec<&str> {
        result
            .trips
            .iter()
            .filter_map(|t| t.id.as_deref())
            .collect()
    }

    fn facade_with(provider: MockNetworkProvider) -> QueryFacade {
        facade_with_limits(provider, QueryLimits::default())
    }

    fn facade_with_limits(mut provider: MockNetworkProvider, limits: QueryLimits) -> QueryFacade {
        provider.expect_configure().return_const(());
        let registry = ProviderRegistry::builder()
            .register("DB", Arc::new(provider) as Arc<dyn NetworkProvider>)
            .build()
            .unwrap();
        QueryFacade::new(Arc::new(registry)).with_limits(limits)
    }

    fn from_to() -> (Location, Location) {
        (
            QueryFacade::make_address_location(52.521_508, 13.411_267),
            QueryFacade::make_address_location(52.506_891, 13.332_711),
        )
    }

    #[test]
    fn test_make_address_location() {
        let loc = QueryFacade::make_address_location(51.05, 13.74);
        assert_eq!(loc.kind(), LocationKind::Address);
        assert!(loc.label().is_none());
        assert_eq!(loc.point(), Some(Point::new(51.05, 13.74)));
    }

    #[test]
    fn test_default_limits() {
        let limits = QueryLimits::default();
        assert_eq!(limits.max_departures, 100);
        assert_eq!(limits.nearby_max_distance_m, 250);
        assert_eq!(limits.nearby_max_locations, 10);
    }

    #[test]
    fn test_limits_deserialize_with_defaults() {
        let limits: QueryLimits = serde_json::from_str(r#"{"max_departures": 20}"#).unwrap();
        assert_eq!(limits.max_departures, 20);
        assert_eq!(limits.nearby_max_distance_m, 250);
    }

    #[tokio::test]
    async fn test_connection_request_parameters() {
        let mut provider = MockNetworkProvider::new();
        let lower = Utc::now() + TimeDelta::minutes(15);
        provider
            .expect_query_trips()
            .withf(move |req| {
                let upper = Utc::now() + TimeDelta::minutes(15);
                req.departure
                    && req.via.is_none()
                    && req.time >= lower
                    && req.time <= upper
                    && req.options.products == Product::ALL.to_vec()
                    && req.options.optimize == Optimize::LeastChanges
                    && req.options.walk_speed == WalkSpeed::Slow
                    && req.options.accessibility == Accessibility::Neutral
            })
            .times(1)
            .returning(|_| Ok(trips_result(&["p1"], None)));
        provider.expect_query_more_trips().never();

        let facade = facade_with(provider);
        let (from, to) = from_to();
        let outcome = facade.calculate_connection(Some("DB"), from, to, 15).await;

        assert!(outcome.is_found());
    }

    #[tokio::test]
    async fn test_continuation_trips_are_appended() {
        let mut provider = MockNetworkProvider::new();
        provider
            .expect_query_trips()
            .times(1)
            .returning(|_| Ok(trips_result(&["p1", "p2", "p3"], Some("later-1"))));
        provider
            .expect_query_more_trips()
            .withf(|ctx, later| *later && ctx.later_ref() == Some("later-1"))
            .times(1)
            .returning(|_, _| Ok(trips_result(&["l1", "l2"], Some("later-2"))));

        let facade = facade_with(provider);
        let (from, to) = from_to();
        let result = facade
            .calculate_connection(None, from, to, 0)
            .await
            .found()
            .unwrap();

        assert_eq!(trip_ids(&result), ["p1", "p2", "p3", "l1", "l2"]);
        assert_eq!(
            result.context.as_ref().and_then(TripContext::later_ref),
            Some("later-2")
        );
    }

    #[tokio::test]
    async fn test_continuation_failure_keeps_primary_trips() {
        let mut provider = MockNetworkProvider::new();
        provider
            .expect_query_trips()
            .times(1)
            .returning(|_| Ok(trips_result(&["p1", "p2", "p3"], Some("later-1"))));
        provider
            .expect_query_more_trips()
            .times(1)
            .returning(|_, _| Err(ProviderError::IllegalState("stale context".to_string())));

        let facade = facade_with(provider);
        let (from, to) = from_to();
        let result = facade
            .calculate_connection(None, from, to, 0)
            .await
            .found()
            .unwrap();

        assert_eq!(trip_ids(&result), ["p1", "p2", "p3"]);
    }

    #[tokio::test]
    async fn test_no_continuation_when_provider_has_no_more() {
        let mut provider = MockNetworkProvider::new();
        provider
            .expect_query_trips()
            .returning(|_| Ok(trips_result(&["p1", "p2"], None)));
        provider.expect_query_more_trips().never();

        let facade = facade_with(provider);
        let (from, to) = from_to();
        let result = facade
            .calculate_connection(None, from, to, 0)
            .await
            .found()
            .unwrap();

        assert_eq!(trip_ids(&result), ["p1", "p2"]);
    }

    #[tokio::test]
    async fn test_primary_failure_is_no_result_without_continuation() {
        let mut provider = MockNetworkProvider::new();
        provider
            .expect_query_trips()
            .times(1)
            .returning(|_| Err(ProviderError::Transport("connection refused".to_string())));
        provider.expect_query_more_trips().never();

        let facade = facade_with(provider);
        let (from, to) = from_to();
        let outcome = facade.calculate_connection(Some("DB"), from, to, 5).await;

        assert!(outcome.is_no_result());
    }

    #[tokio::test]
    async fn test_missing_context_is_no_result() {
        let mut provider = MockNetworkProvider::new();
        provider
            .expect_query_trips()
            .returning(|_| Ok(QueryTripsResult::new(vec![trip("p1")], None)));
        provider.expect_query_more_trips().never();

        let facade = facade_with(provider);
        let (from, to) = from_to();
        let outcome = facade.calculate_connection(None, from, to, 0).await;

        assert!(outcome.is_no_result());
    }

    #[tokio::test]
    async fn test_empty_trip_list_is_found() {
        let mut provider = MockNetworkProvider::new();
        provider
            .expect_query_trips()
            .returning(|_| Ok(trips_result(&[], None)));

        let facade = facade_with(provider);
        let (from, to) = from_to();
        let outcome = facade.calculate_connection(None, from, to, 0).await;

        assert!(outcome.found().unwrap().trips.is_empty());
    }

    #[tokio::test]
    async fn test_negative_delay_departs_in_the_past() {
        let mut provider = MockNetworkProvider::new();
        provider
            .expect_query_trips()
            .withf(|req| req.time < Utc::now() - TimeDelta::minutes(9))
            .returning(|_| Ok(trips_result(&["p1"], None)));

        let facade = facade_with(provider);
        let (from, to) = from_to();
        let outcome = facade.calculate_connection(None, from, to, -10).await;

        assert!(outcome.is_found());
    }

    #[tokio::test]
    async fn test_unknown_provider_uses_default() {
        let mut default = MockNetworkProvider::new();
        default.expect_configure().return_const(());
        default
            .expect_query_trips()
            .times(1)
            .returning(|_| Ok(trips_result(&["from-default"], None)));

        let mut other = MockNetworkProvider::new();
        other.expect_configure().return_const(());
        other.expect_query_trips().never();

        let registry = ProviderRegistry::builder()
            .register("A", Arc::new(default) as Arc<dyn NetworkProvider>)
            .register("B", Arc::new(other) as Arc<dyn NetworkProvider>)
            .default_provider("A")
            .build()
            .unwrap();
        let facade = QueryFacade::new(Arc::new(registry));
        assert_eq!(facade.list_provider_ids(), ["A", "B"]);

        let (from, to) = from_to();
        let result = facade
            .calculate_connection(Some("Z"), from, to, 0)
            .await
            .found()
            .unwrap();
        assert_eq!(trip_ids(&result), ["from-default"]);
    }

    #[tokio::test]
    async fn test_departures_request_and_passthrough() {
        let board = QueryDeparturesResult {
            station_departures: vec![StationDepartures {
                location: Location::station("8010159", Some("Leipzig Hbf".to_string()), None),
                departures: vec![Departure {
                    planned_time: Some(Utc.with_ymd_and_hms(2026, 2, 11, 8, 0, 0).unwrap()),
                    predicted_time: None,
                    line: None,
                    position: Some("11".to_string()),
                    destination: None,
                    arrival: false,
                }],
            }],
        };
        let expected = board.clone();

        let mut provider = MockNetworkProvider::new();
        provider
            .expect_query_departures()
            .withf(|req| {
                req.station_id == "8010159" && req.max_departures == 100 && !req.include_arrivals
            })
            .times(1)
            .returning(move |_| Ok(board.clone()));

        let facade = facade_with(provider);
        let outcome = facade.get_departures(Some("DB"), "8010159").await;

        assert_eq!(outcome, QueryOutcome::Found(expected));
    }

    #[tokio::test]
    async fn test_departures_failure_is_no_result() {
        let mut provider = MockNetworkProvider::new();
        provider
            .expect_query_departures()
            .returning(|_| Err(ProviderError::UpstreamStatus { status: 500 }));

        let facade = facade_with(provider);
        assert!(facade.get_departures(None, "8010159").await.is_no_result());
    }

    #[tokio::test]
    async fn test_departures_use_configured_limit() {
        let mut provider = MockNetworkProvider::new();
        provider
            .expect_query_departures()
            .withf(|req| req.max_departures == 20)
            .times(1)
            .returning(|_| Ok(QueryDeparturesResult::default()));

        let limits = QueryLimits {
            max_departures: 20,
            ..QueryLimits::default()
        };
        let facade = facade_with_limits(provider, limits);
        assert!(facade.get_departures(None, "1").await.is_found());
    }

    #[tokio::test]
    async fn test_nearest_stations_request_and_passthrough() {
        let nearby = NearbyLocationsResult {
            locations: vec![NearbyLocation {
                location: Location::station(
                    "900100003",
                    Some("S+U Alexanderplatz".to_string()),
                    Some(Point::new(52.521_508, 13.411_267)),
                ),
                distance_m: 42,
            }],
        };
        let expected = nearby.clone();

        let mut provider = MockNetworkProvider::new();
        provider
            .expect_query_nearby_locations()
            .withf(|req| {
                req.types == vec![LocationKind::Station]
                    && req.location.kind() == LocationKind::Coord
                    && req.location.point() == Some(Point::new(52.52, 13.41))
                    && req.max_distance_m == 250
                    && req.max_locations == 10
            })
            .times(1)
            .returning(move |_| Ok(nearby.clone()));

        let facade = facade_with(provider);
        let outcome = facade.get_nearest_stations(Some("DB"), 52.52, 13.41).await;

        assert_eq!(outcome, QueryOutcome::Found(expected));
    }

    #[tokio::test]
    async fn test_nearest_stations_failure_is_no_result() {
        let mut provider = MockNetworkProvider::new();
        provider
            .expect_query_nearby_locations()
            .returning(|_| Err(ProviderError::Parse("unexpected token".to_string())));

        let facade = facade_with(provider);
        assert!(
            facade
                .get_nearest_stations(None, 52.52, 13.41)
                .await
                .is_no_result()
        );
    }
}
