//! Departure board results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Line;
use crate::value_objects::Location;

/// A single departure (or arrival) at a station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Departure {
    /// Scheduled time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_time: Option<DateTime<Utc>>,
    /// Real-time prediction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_time: Option<DateTime<Utc>>,
    /// Line serving this departure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    /// Platform or stop position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Destination (for arrivals: where the service came from)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Location>,
    /// Whether this entry is an arrival rather than a departure
    #[serde(default)]
    pub arrival: bool,
}

impl Departure {
    /// Best known time: prediction if available, otherwise the schedule
    #[must_use]
    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.predicted_time.or(self.planned_time)
    }
}

/// Departures grouped by the station they leave from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationDepartures {
    /// The station
    pub location: Location,
    /// Departures in time order
    pub departures: Vec<Departure>,
}

/// Result of a departure board query
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryDeparturesResult {
    /// Boards per station
    pub station_departures: Vec<StationDepartures>,
}

impl QueryDeparturesResult {
    /// Total number of departures across all stations
    #[must_use]
    pub fn departure_count(&self) -> usize {
        self.station_departures
            .iter()
            .map(|s| s.departures.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn departure(planned_min: u32, predicted_min: Option<u32>) -> Departure {
        let at = |m| Utc.with_ymd_and_hms(2026, 2, 11, 8, m, 0).unwrap();
        Departure {
            planned_time: Some(at(planned_min)),
            predicted_time: predicted_min.map(at),
            line: None,
            position: None,
            destination: None,
            arrival: false,
        }
    }

    #[test]
    fn time_prefers_prediction() {
        let d = departure(10, Some(12));
        assert_eq!(d.time(), d.predicted_time);

        let d = departure(10, None);
        assert_eq!(d.time(), d.planned_time);
    }

    #[test]
    fn departure_count_sums_stations() {
        let result = QueryDeparturesResult {
            station_departures: vec![
                StationDepartures {
                    location: Location::station("1", None, None),
                    departures: vec![departure(1, None), departure(2, None)],
                },
                StationDepartures {
                    location: Location::station("2", None, None),
                    departures: vec![departure(3, None)],
                },
            ],
        };
        assert_eq!(result.departure_count(), 3);
        assert_eq!(QueryDeparturesResult::default().departure_count(), 0);
    }
}
