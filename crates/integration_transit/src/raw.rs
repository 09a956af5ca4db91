//! Raw transport.rest response types and their conversion to domain values

use application::ProviderError;
use chrono::{DateTime, Utc};
use domain::{Departure, Leg, Line, Location, Point, Trip};
use serde::Deserialize;

use crate::config::HafasProfile;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawJourneysResponse {
    pub journeys: Vec<RawJourney>,
    pub earlier_ref: Option<String>,
    pub later_ref: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawJourney {
    legs: Vec<RawLeg>,
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLeg {
    origin: RawPlace,
    destination: RawPlace,
    departure: Option<DateTime<Utc>>,
    planned_departure: Option<DateTime<Utc>>,
    arrival: Option<DateTime<Utc>>,
    planned_arrival: Option<DateTime<Utc>>,
    departure_delay: Option<i64>,
    arrival_delay: Option<i64>,
    departure_platform: Option<String>,
    arrival_platform: Option<String>,
    line: Option<RawLine>,
    direction: Option<String>,
    walking: Option<bool>,
    distance: Option<u32>,
}

/// A stop, station, address, or POI as transport.rest reports it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawPlace {
    #[serde(rename = "type")]
    kind: Option<String>,
    id: Option<String>,
    name: Option<String>,
    address: Option<String>,
    poi: Option<bool>,
    location: Option<RawCoord>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    pub distance: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawCoord {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct RawLine {
    name: Option<String>,
    product: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawDeparture {
    stop: Option<RawPlace>,
    when: Option<DateTime<Utc>>,
    planned_when: Option<DateTime<Utc>>,
    platform: Option<String>,
    planned_platform: Option<String>,
    direction: Option<String>,
    provenance: Option<String>,
    line: Option<RawLine>,
    destination: Option<RawPlace>,
    origin: Option<RawPlace>,
}

/// `/stops/{id}/departures` answers with a bare array on older deployments
/// and with `{ "departures": [...] }` on v6.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawBoardResponse {
    Departures { departures: Vec<RawDeparture> },
    Arrivals { arrivals: Vec<RawDeparture> },
    Bare(Vec<RawDeparture>),
}

impl RawBoardResponse {
    pub fn into_entries(self) -> Vec<RawDeparture> {
        match self {
            Self::Departures { departures } => departures,
            Self::Arrivals { arrivals } => arrivals,
            Self::Bare(entries) => entries,
        }
    }
}

impl RawPlace {
    fn coord(&self) -> Option<Point> {
        self.location
            .as_ref()
            .map(|c| Point::new(c.latitude, c.longitude))
            .or_else(|| match (self.latitude, self.longitude) {
                (Some(lat), Some(lon)) => Some(Point::new(lat, lon)),
                _ => None,
            })
    }

    /// Convert to a domain location
    ///
    /// Stops and stations need an id; anything else becomes a POI or an
    /// address. Returns `None` for places carrying nothing usable.
    pub fn into_location(self) -> Option<Location> {
        let coord = self.coord();
        match (self.kind.as_deref(), self.id) {
            (Some("stop" | "station"), Some(id)) => Some(Location::station(id, self.name, coord)),
            (_, id) if self.poi == Some(true) => Some(Location::poi(id, self.name, coord)),
            (_, _) => {
                let label = self.address.or(self.name);
                (label.is_some() || coord.is_some()).then(|| Location::address(label, coord))
            },
        }
    }
}

impl RawLine {
    fn into_line(self, profile: HafasProfile, direction: Option<String>) -> Line {
        Line {
            name: self.name.unwrap_or_default(),
            product: self.product.as_deref().and_then(|p| profile.product(p)),
            direction,
        }
    }
}

fn required_place(place: RawPlace, what: &str) -> Result<Location, ProviderError> {
    place
        .into_location()
        .ok_or_else(|| ProviderError::MissingData(format!("{what} has no usable location")))
}

impl RawLeg {
    fn into_leg(self, profile: HafasProfile) -> Result<Leg, ProviderError> {
        let planned_departure = self
            .planned_departure
            .or(self.departure)
            .ok_or_else(|| ProviderError::MissingData("leg without departure time".to_string()))?;
        let planned_arrival = self
            .planned_arrival
            .or(self.arrival)
            .ok_or_else(|| ProviderError::MissingData("leg without arrival time".to_string()))?;

        Ok(Leg {
            origin: required_place(self.origin, "leg origin")?,
            destination: required_place(self.destination, "leg destination")?,
            departure: self.departure.unwrap_or(planned_departure),
            planned_departure,
            arrival: self.arrival.unwrap_or(planned_arrival),
            planned_arrival,
            departure_delay_secs: self.departure_delay,
            arrival_delay_secs: self.arrival_delay,
            departure_platform: self.departure_platform,
            arrival_platform: self.arrival_platform,
            line: self.line.map(|l| l.into_line(profile, self.direction)),
            walking: self.walking.unwrap_or(false),
            distance_m: self.distance,
        })
    }
}

impl RawJourney {
    pub fn into_trip(self, profile: HafasProfile) -> Result<Trip, ProviderError> {
        let legs = self
            .legs
            .into_iter()
            .map(|leg| leg.into_leg(profile))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Trip {
            id: self.refresh_token,
            legs,
        })
    }
}

impl RawDeparture {
    /// Station this entry belongs to, if reported
    pub fn take_stop(&mut self) -> Option<Location> {
        self.stop.take().and_then(RawPlace::into_location)
    }

    pub fn into_departure(self, profile: HafasProfile, arrival: bool) -> Departure {
        // For arrivals the interesting endpoint is where the service came from
        let (endpoint, label) = if arrival {
            (self.origin, self.provenance)
        } else {
            (self.destination, self.direction)
        };
        let destination = endpoint
            .and_then(RawPlace::into_location)
            .or_else(|| label.clone().map(|l| Location::address(Some(l), None)));

        Departure {
            planned_time: self.planned_when.or(self.when),
            predicted_time: self.when,
            line: self.line.map(|l| l.into_line(profile, label)),
            position: self.platform.or(self.planned_platform),
            destination,
            arrival,
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::{LocationKind, Product};

    use super::*;

    #[test]
    fn test_parse_journey_with_station_legs() {
        let json = r#"{
            "earlierRef": "earlier123",
            "laterRef": "later456",
            "journeys": [{
                "refreshToken": "token123",
                "legs": [{
                    "origin": {
                        "type": "stop",
                        "id": "8011113",
                        "name": "Berlin Südkreuz",
                        "location": { "latitude": 52.47623, "longitude": 13.365863 }
                    },
                    "destination": {
                        "type": "stop",
                        "id": "8010205",
                        "name": "Leipzig Hbf",
                        "location": { "latitude": 51.3, "longitude": 12.38 }
                    },
                    "departure": "2026-02-11T14:38:00Z",
                    "plannedDeparture": "2026-02-11T14:37:00Z",
                    "arrival": "2026-02-11T15:42:00Z",
                    "plannedArrival": "2026-02-11T15:42:00Z",
                    "departureDelay": 60,
                    "arrivalDelay": null,
                    "departurePlatform": "3",
                    "arrivalPlatform": "11",
                    "direction": "München Hbf",
                    "line": { "name": "ICE 1601", "product": "nationalExpress", "mode": "train" }
                }]
            }]
        }"#;

        let raw: RawJourneysResponse = serde_json::from_str(json).unwrap();
        assert_eq!(raw.earlier_ref.as_deref(), Some("earlier123"));
        assert_eq!(raw.later_ref.as_deref(), Some("later456"));

        let trip = raw
            .journeys
            .into_iter()
            .next()
            .unwrap()
            .into_trip(HafasProfile::Db)
            .unwrap();
        assert_eq!(trip.id.as_deref(), Some("token123"));

        let leg = &trip.legs[0];
        assert_eq!(leg.origin.kind(), LocationKind::Station);
        assert_eq!(leg.origin.id(), Some("8011113"));
        assert_eq!(leg.destination.label(), Some("Leipzig Hbf"));
        assert_eq!(leg.departure_delay_secs, Some(60));
        assert!(leg.departure > leg.planned_departure);
        let line = leg.line.as_ref().unwrap();
        assert_eq!(line.name, "ICE 1601");
        assert_eq!(line.product, Some(Product::HighSpeedTrain));
        assert_eq!(line.direction.as_deref(), Some("München Hbf"));
        assert!(!leg.walking);
    }

    #[test]
    fn test_parse_walking_leg_to_address() {
        let json = r#"{
            "legs": [{
                "origin": { "type": "location", "address": "Unter den Linden 1", "latitude": 52.517, "longitude": 13.396 },
                "destination": { "type": "stop", "id": "900100003", "name": "S+U Alexanderplatz" },
                "plannedDeparture": "2026-02-11T15:42:00Z",
                "plannedArrival": "2026-02-11T15:48:00Z",
                "walking": true,
                "distance": 116
            }]
        }"#;

        let raw: RawJourney = serde_json::from_str(json).unwrap();
        let trip = raw.into_trip(HafasProfile::Vbb).unwrap();
        let leg = &trip.legs[0];
        assert!(leg.walking);
        assert_eq!(leg.distance_m, Some(116));
        assert!(leg.line.is_none());
        assert_eq!(leg.origin.kind(), LocationKind::Address);
        assert_eq!(leg.origin.label(), Some("Unter den Linden 1"));
        assert!(leg.origin.has_point());
        // No realtime data: expected times fall back to the schedule
        assert_eq!(leg.departure, leg.planned_departure);
    }

    #[test]
    fn test_leg_without_times_is_missing_data() {
        let json = r#"{
            "legs": [{
                "origin": { "type": "stop", "id": "1" },
                "destination": { "type": "stop", "id": "2" }
            }]
        }"#;
        let raw: RawJourney = serde_json::from_str(json).unwrap();
        let err = raw.into_trip(HafasProfile::Db).unwrap_err();
        assert!(matches!(err, ProviderError::MissingData(_)));
    }

    #[test]
    fn test_place_conversion() {
        let poi: RawPlace = serde_json::from_str(
            r#"{"type":"location","id":"991","name":"Museum","poi":true,"latitude":1.0,"longitude":2.0}"#,
        )
        .unwrap();
        let poi = poi.into_location().unwrap();
        assert_eq!(poi.kind(), LocationKind::Poi);
        assert_eq!(poi.id(), Some("991"));

        let empty: RawPlace = serde_json::from_str(r#"{"type":"location"}"#).unwrap();
        assert!(empty.into_location().is_none());

        let anonymous_stop: RawPlace = serde_json::from_str(r#"{"type":"stop","name":"X"}"#).unwrap();
        assert_eq!(
            anonymous_stop.into_location().unwrap().kind(),
            LocationKind::Address
        );
    }

    #[test]
    fn test_board_response_shapes() {
        let bare: RawBoardResponse = serde_json::from_str(r#"[{"direction":"A"}]"#).unwrap();
        assert_eq!(bare.into_entries().len(), 1);

        let wrapped: RawBoardResponse =
            serde_json::from_str(r#"{"departures":[{"direction":"A"},{"direction":"B"}]}"#)
                .unwrap();
        assert_eq!(wrapped.into_entries().len(), 2);

        let arrivals: RawBoardResponse =
            serde_json::from_str(r#"{"arrivals":[{"provenance":"C"}]}"#).unwrap();
        assert_eq!(arrivals.into_entries().len(), 1);
    }

    #[test]
    fn test_departure_conversion() {
        let raw: RawDeparture = serde_json::from_str(
            r#"{
                "when": "2026-02-11T10:02:00Z",
                "plannedWhen": "2026-02-11T10:00:00Z",
                "platform": null,
                "plannedPlatform": "2",
                "direction": "Ahrensfelde",
                "line": { "name": "S7", "product": "suburban" },
                "destination": { "type": "stop", "id": "900170004", "name": "S Ahrensfelde" }
            }"#,
        )
        .unwrap();

        let departure = raw.into_departure(HafasProfile::Vbb, false);
        assert_eq!(departure.position.as_deref(), Some("2"));
        assert!(departure.predicted_time > departure.planned_time);
        let line = departure.line.unwrap();
        assert_eq!(line.product, Some(Product::SuburbanTrain));
        assert_eq!(line.direction.as_deref(), Some("Ahrensfelde"));
        assert_eq!(departure.destination.unwrap().id(), Some("900170004"));
        assert!(!departure.arrival);
    }

    #[test]
    fn test_arrival_uses_provenance() {
        let raw: RawDeparture =
            serde_json::from_str(r#"{"plannedWhen":"2026-02-11T10:00:00Z","provenance":"Spandau"}"#)
                .unwrap();
        let arrival = raw.into_departure(HafasProfile::Vbb, true);
        assert!(arrival.arrival);
        assert_eq!(
            arrival.destination.as_ref().and_then(Location::label),
            Some("Spandau")
        );
        assert_eq!(arrival.planned_time, arrival.time());
    }
}
