//! Trip search results
//!
//! A [`QueryTripsResult`] holds the trips a provider found plus a
//! [`TripContext`] that can be handed back to the same provider to page
//! through further trips.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Line, TripRequest};
use crate::value_objects::Location;

/// A single leg (segment) of a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    /// Where the leg starts
    pub origin: Location,
    /// Where the leg ends
    pub destination: Location,
    /// Expected departure (includes delay when known)
    pub departure: DateTime<Utc>,
    /// Scheduled departure
    pub planned_departure: DateTime<Utc>,
    /// Expected arrival (includes delay when known)
    pub arrival: DateTime<Utc>,
    /// Scheduled arrival
    pub planned_arrival: DateTime<Utc>,
    /// Departure delay in seconds (None = unknown, 0 = on time)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_delay_secs: Option<i64>,
    /// Arrival delay in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_delay_secs: Option<i64>,
    /// Departure platform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_platform: Option<String>,
    /// Arrival platform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_platform: Option<String>,
    /// Line (None for walking legs)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    /// Whether this is a walking leg
    #[serde(default)]
    pub walking: bool,
    /// Walking distance in meters (walking legs only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<u32>,
}

/// One trip option from origin to destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Provider-specific trip id (refresh token or similar)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Legs in travel order
    pub legs: Vec<Leg>,
}

impl Trip {
    /// Departure of the first leg
    #[must_use]
    pub fn first_departure(&self) -> Option<DateTime<Utc>> {
        self.legs.first().map(|leg| leg.departure)
    }

    /// Arrival of the last leg
    #[must_use]
    pub fn last_arrival(&self) -> Option<DateTime<Utc>> {
        self.legs.last().map(|leg| leg.arrival)
    }

    /// Number of vehicle changes (walking legs are not counted)
    #[must_use]
    pub fn num_changes(&self) -> usize {
        self.legs
            .iter()
            .filter(|leg| !leg.walking)
            .count()
            .saturating_sub(1)
    }
}

/// Continuation state for paging through trip results
///
/// Opaque to callers: only the provider that produced it knows how to use
/// the references it carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripContext {
    request: TripRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    earlier_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    later_ref: Option<String>,
}

impl TripContext {
    /// Create a context for the request that produced a result
    #[must_use]
    pub const fn new(
        request: TripRequest,
        earlier_ref: Option<String>,
        later_ref: Option<String>,
    ) -> Self {
        Self {
            request,
            earlier_ref,
            later_ref,
        }
    }

    /// The original request
    #[must_use]
    pub const fn request(&self) -> &TripRequest {
        &self.request
    }

    /// Reference for earlier trips
    #[must_use]
    pub fn earlier_ref(&self) -> Option<&str> {
        self.earlier_ref.as_deref()
    }

    /// Reference for later trips
    #[must_use]
    pub fn later_ref(&self) -> Option<&str> {
        self.later_ref.as_deref()
    }

    /// Whether later trips can be queried
    #[must_use]
    pub const fn can_query_later(&self) -> bool {
        self.later_ref.is_some()
    }

    /// Whether earlier trips can be queried
    #[must_use]
    pub const fn can_query_earlier(&self) -> bool {
        self.earlier_ref.is_some()
    }
}

/// Result of a trip search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTripsResult {
    /// Trips in provider order
    pub trips: Vec<Trip>,
    /// Continuation context, always present on a well-formed answer
    ///
    /// A provider that cannot page still returns a context without
    /// references. `None` marks a malformed result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<TripContext>,
}

impl QueryTripsResult {
    /// Create a result
    #[must_use]
    pub const fn new(trips: Vec<Trip>, context: Option<TripContext>) -> Self {
        Self { trips, context }
    }

    /// Build a new result with `later`'s trips appended after these
    ///
    /// The merged result continues from `later`'s context.
    #[must_use]
    pub fn followed_by(&self, later: Self) -> Self {
        let mut trips = Vec::with_capacity(self.trips.len() + later.trips.len());
        trips.extend(self.trips.iter().cloned());
        trips.extend(later.trips);
        Self {
            trips,
            context: later.context,
        }
    }
}
