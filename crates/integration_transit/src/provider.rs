//! HAFAS network provider via the transport.rest API
//!
//! Implements [`NetworkProvider`] for the public v6 deployments at
//! [v6.db.transport.rest](https://v6.db.transport.rest) and the Berlin
//! endpoints.

use std::sync::OnceLock;
use std::time::Duration;

use application::{ClientIdentity, NetworkProvider, ProviderError};
use async_trait::async_trait;
use domain::{
    Accessibility, Departure, DeparturesRequest, Location, LocationKind, NearbyLocation,
    NearbyLocationsResult, NearbyRequest, Optimize, QueryDeparturesResult, QueryTripsResult,
    StationDepartures, TripContext, TripRequest, WalkSpeed,
};
use reqwest::{Client, StatusCode, header::USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::HafasConfig;
use crate::raw::{RawBoardResponse, RawJourneysResponse, RawPlace};

type QueryParams = Vec<(&'static str, String)>;

/// Network provider backed by a transport.rest HAFAS endpoint
#[derive(Debug)]
pub struct HafasProvider {
    client: Client,
    config: HafasConfig,
    user_agent: OnceLock<String>,
}

impl HafasProvider {
    /// Create a provider for the given endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: HafasConfig) -> Result<Self, ProviderError> {
        config.validate().map_err(ProviderError::IllegalState)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(ClientIdentity::default().user_agent)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            config,
            user_agent: OnceLock::new(),
        })
    }

    /// Endpoint configuration
    #[must_use]
    pub const fn config(&self) -> &HafasConfig {
        &self.config
    }

    /// User agent set through [`NetworkProvider::configure`]
    ///
    /// Until then requests carry the default `transit-gateway/<version>`.
    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.get().map(String::as_str)
    }

    /// Build an endpoint URL from path segments below the base URL
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| ProviderError::IllegalState(format!("invalid base_url: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| {
                ProviderError::IllegalState(format!(
                    "base_url cannot carry a path: {}",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issue a GET request and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&'static str, String)],
    ) -> Result<T, ProviderError> {
        debug!(url = %url, "Querying transport.rest");

        let mut request = self.client.get(url).query(params);
        if let Some(user_agent) = self.user_agent.get() {
            request = request.header(USER_AGENT, user_agent);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                }
            } else {
                ProviderError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(ProviderError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                }
            } else {
                ProviderError::Transport(e.to_string())
            }
        })?;

        serde_json::from_str(&body).map_err(|e| ProviderError::Parse(e.to_string()))
    }

    /// Query parameters shared by the first page and continuation pages
    fn journey_params(&self, request: &TripRequest) -> Result<QueryParams, ProviderError> {
        let mut params = QueryParams::new();
        push_location(&mut params, &FROM, &request.from)?;
        push_location(&mut params, &TO, &request.to)?;

        if let Some(via) = &request.via {
            let id = station_id(via).ok_or_else(|| {
                ProviderError::IllegalState("via location must be a station".to_string())
            })?;
            params.push(("via", id.to_string()));
        }

        let options = &request.options;
        if options.optimize != Optimize::LeastDuration {
            debug!(optimize = ?options.optimize, "No optimize parameter upstream, ignoring");
        }

        params.push(("results", self.config.max_results.to_string()));
        params.push(("walkingSpeed", walking_speed_param(options.walk_speed).to_string()));
        params.push(("accessibility", accessibility_param(options.accessibility).to_string()));
        for (key, product) in self.config.profile.product_keys() {
            params.push((*key, options.allows(*product).to_string()));
        }
        params.push(("stopovers", "false".to_string()));
        params.push(("remarks", "false".to_string()));
        params.push(("language", self.config.language.clone()));

        Ok(params)
    }

    async fn fetch_journeys(
        &self,
        request: &TripRequest,
        params: &[(&'static str, String)],
    ) -> Result<QueryTripsResult, ProviderError> {
        let raw: RawJourneysResponse = self.get_json(self.endpoint(&["journeys"])?, params).await?;

        let profile = self.config.profile;
        let trips = raw
            .journeys
            .into_iter()
            .map(|journey| journey.into_trip(profile))
            .collect::<Result<Vec<_>, _>>()?;

        if trips.is_empty() {
            warn!("No journeys found");
        }
        debug!(count = trips.len(), "Journeys found");

        let context = TripContext::new(request.clone(), raw.earlier_ref, raw.later_ref);
        Ok(QueryTripsResult::new(trips, Some(context)))
    }

    /// Fetch one board (departures or arrivals) of a station
    async fn fetch_board(
        &self,
        request: &DeparturesRequest,
        arrivals: bool,
    ) -> Result<(Option<Location>, Vec<Departure>), ProviderError> {
        let board = if arrivals { "arrivals" } else { "departures" };
        let url = self.endpoint(&["stops", &request.station_id, board])?;

        let mut params: QueryParams = vec![
            ("when", request.time.to_rfc3339()),
            (
                "duration",
                self.config.departures_duration_minutes.to_string(),
            ),
            ("remarks", "false".to_string()),
            ("language", self.config.language.clone()),
        ];
        if request.max_departures > 0 {
            params.push(("results", request.max_departures.to_string()));
        }

        let raw: RawBoardResponse = self.get_json(url, &params).await?;

        let profile = self.config.profile;
        let mut station = None;
        let entries = raw
            .into_entries()
            .into_iter()
            .map(|mut entry| {
                if station.is_none() {
                    station = entry.take_stop();
                }
                entry.into_departure(profile, arrivals)
            })
            .collect();

        Ok((station, entries))
    }
}

/// Query keys for one end of a journey
#[derive(Debug)]
struct EndpointKeys {
    station: &'static str,
    latitude: &'static str,
    longitude: &'static str,
    address: &'static str,
    poi_id: &'static str,
    poi_name: &'static str,
}

const FROM: EndpointKeys = EndpointKeys {
    station: "from",
    latitude: "from.latitude",
    longitude: "from.longitude",
    address: "from.address",
    poi_id: "from.id",
    poi_name: "from.name",
};

const TO: EndpointKeys = EndpointKeys {
    station: "to",
    latitude: "to.latitude",
    longitude: "to.longitude",
    address: "to.address",
    poi_id: "to.id",
    poi_name: "to.name",
};

/// Append the parameters describing one end of a journey
///
/// Stations travel as a bare id; addresses and POIs as coordinates.
fn push_location(
    params: &mut QueryParams,
    keys: &EndpointKeys,
    location: &Location,
) -> Result<(), ProviderError> {
    if let Some(id) = station_id(location) {
        params.push((keys.station, id.to_string()));
        return Ok(());
    }

    let Some(coord) = location.point() else {
        return Err(ProviderError::IllegalState(format!(
            "{} location needs a station id or coordinates",
            keys.station
        )));
    };

    params.push((keys.latitude, coord.latitude().to_string()));
    params.push((keys.longitude, coord.longitude().to_string()));
    if location.kind() == LocationKind::Poi {
        if let Some(id) = location.id() {
            params.push((keys.poi_id, id.to_string()));
        }
        params.push((keys.poi_name, location.to_string()));
    } else {
        params.push((keys.address, location.to_string()));
    }

    Ok(())
}

fn station_id(location: &Location) -> Option<&str> {
    (location.kind() == LocationKind::Station)
        .then(|| location.id())
        .flatten()
}

const fn walking_speed_param(speed: WalkSpeed) -> &'static str {
    match speed {
        WalkSpeed::Slow => "slow",
        WalkSpeed::Normal => "normal",
        WalkSpeed::Fast => "fast",
    }
}

const fn accessibility_param(accessibility: Accessibility) -> &'static str {
    match accessibility {
        Accessibility::Neutral => "none",
        Accessibility::Limited => "partial",
        Accessibility::BarrierFree => "complete",
    }
}

fn time_param(request: &TripRequest) -> (&'static str, String) {
    let key = if request.departure {
        "departure"
    } else {
        "arrival"
    };
    (key, request.time.to_rfc3339())
}

#[async_trait]
impl NetworkProvider for HafasProvider {
    fn configure(&self, identity: &ClientIdentity) {
        if self.user_agent.set(identity.user_agent.clone()).is_err() {
            debug!("Provider already configured, keeping the first identity");
        }
    }

    #[instrument(skip(self, request), fields(from = %request.from, to = %request.to))]
    async fn query_trips(&self, request: &TripRequest) -> Result<QueryTripsResult, ProviderError> {
        let mut params = self.journey_params(request)?;
        params.push(time_param(request));
        self.fetch_journeys(request, &params).await
    }

    #[instrument(skip(self, context))]
    async fn query_more_trips(
        &self,
        context: &TripContext,
        later: bool,
    ) -> Result<QueryTripsResult, ProviderError> {
        let (key, reference) = if later {
            ("laterThan", context.later_ref())
        } else {
            ("earlierThan", context.earlier_ref())
        };
        let reference = reference.ok_or_else(|| {
            ProviderError::IllegalState(format!("no {key} reference in trip context"))
        })?;

        let request = context.request();
        let mut params = self.journey_params(request)?;
        params.push((key, reference.to_string()));
        self.fetch_journeys(request, &params).await
    }

    #[instrument(skip(self, request), fields(station = %request.station_id))]
    async fn query_departures(
        &self,
        request: &DeparturesRequest,
    ) -> Result<QueryDeparturesResult, ProviderError> {
        if request.station_id.trim().is_empty() {
            return Err(ProviderError::IllegalState(
                "station id must not be empty".to_string(),
            ));
        }

        let (station, mut departures) = self.fetch_board(request, false).await?;
        let station = if request.include_arrivals {
            let (arrival_station, arrivals) = self.fetch_board(request, true).await?;
            departures.extend(arrivals);
            station.or(arrival_station)
        } else {
            station
        };

        departures.sort_by_key(|d| (d.time().is_none(), d.time()));
        if request.max_departures > 0 {
            departures.truncate(usize::from(request.max_departures));
        }
        debug!(count = departures.len(), "Departures found");

        let location =
            station.unwrap_or_else(|| Location::station(request.station_id.clone(), None, None));
        Ok(QueryDeparturesResult {
            station_departures: vec![StationDepartures {
                location,
                departures,
            }],
        })
    }

    #[instrument(skip(self, request), fields(location = %request.location))]
    async fn query_nearby_locations(
        &self,
        request: &NearbyRequest,
    ) -> Result<NearbyLocationsResult, ProviderError> {
        let Some(centre) = request.location.point() else {
            return Err(ProviderError::IllegalState(
                "nearby search needs coordinates".to_string(),
            ));
        };

        let stops = request.wants(LocationKind::Station);
        let poi = request.wants(LocationKind::Poi);
        if !stops && !poi {
            debug!(types = ?request.types, "No location kind transport.rest can search for");
            return Ok(NearbyLocationsResult::default());
        }

        let mut params: QueryParams = vec![
            ("latitude", centre.latitude().to_string()),
            ("longitude", centre.longitude().to_string()),
            ("stops", stops.to_string()),
            ("poi", poi.to_string()),
            ("linesOfStops", "false".to_string()),
            ("language", self.config.language.clone()),
        ];
        if request.max_distance_m > 0 {
            params.push(("distance", request.max_distance_m.to_string()));
        }
        if request.max_locations > 0 {
            params.push(("results", request.max_locations.to_string()));
        }

        let raw: Vec<RawPlace> = self
            .get_json(self.endpoint(&["locations", "nearby"])?, &params)
            .await?;

        let mut locations: Vec<NearbyLocation> = raw
            .into_iter()
            .filter_map(|place| {
                let reported = place.distance;
                let location = place.into_location()?;
                let distance_m = reported
                    .or_else(|| location.point().map(|c| meters(centre.distance_m(&c))))?;
                Some(NearbyLocation {
                    location,
                    distance_m,
                })
            })
            .filter(|nearby| request.wants(nearby.location.kind()))
            .filter(|nearby| {
                request.max_distance_m == 0 || nearby.distance_m <= request.max_distance_m
            })
            .collect();

        locations.sort_by_key(|nearby| nearby.distance_m);
        if request.max_locations > 0 {
            locations.truncate(usize::from(request.max_locations));
        }
        debug!(count = locations.len(), "Nearby locations found");

        Ok(NearbyLocationsResult { locations })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn meters(distance: f64) -> u32 {
    distance.round().clamp(0.0, f64::from(u32::MAX)) as u32
}
