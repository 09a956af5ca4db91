//! Query parameters handed to transit network providers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Product;
use crate::value_objects::{Location, LocationKind};

/// What a trip search should optimise for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Optimize {
    /// Fastest arrival
    #[default]
    LeastDuration,
    /// Fewest vehicle changes
    LeastChanges,
    /// Shortest walking distance
    LeastWalking,
}

/// Assumed walking speed for transfers and access legs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkSpeed {
    /// Slow walker
    Slow,
    /// Average walker
    #[default]
    Normal,
    /// Fast walker
    Fast,
}

/// Accessibility requirements for a trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    /// No particular requirement
    #[default]
    Neutral,
    /// Avoid stairs where possible
    Limited,
    /// Step-free access required
    BarrierFree,
}

/// Options shaping a trip search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripOptions {
    /// Product classes that may be used
    pub products: Vec<Product>,
    /// Optimisation goal
    pub optimize: Optimize,
    /// Walking speed
    pub walk_speed: WalkSpeed,
    /// Accessibility requirement
    pub accessibility: Accessibility,
}

impl Default for TripOptions {
    fn default() -> Self {
        Self {
            products: Product::ALL.to_vec(),
            optimize: Optimize::default(),
            walk_speed: WalkSpeed::default(),
            accessibility: Accessibility::default(),
        }
    }
}

impl TripOptions {
    /// Whether the given product class is allowed
    #[must_use]
    pub fn allows(&self, product: Product) -> bool {
        self.products.contains(&product)
    }
}

/// A trip search between two locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Origin
    pub from: Location,
    /// Optional intermediate location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via: Option<Location>,
    /// Destination
    pub to: Location,
    /// Reference instant
    pub time: DateTime<Utc>,
    /// `true` if `time` is the departure time, `false` if it is the arrival time
    pub departure: bool,
    /// Search options
    pub options: TripOptions,
}

impl TripRequest {
    /// Create a request departing at `time` with default options
    #[must_use]
    pub fn departing(from: Location, to: Location, time: DateTime<Utc>) -> Self {
        Self {
            from,
            via: None,
            to,
            time,
            departure: true,
            options: TripOptions::default(),
        }
    }

    /// Replace the search options
    #[must_use]
    pub fn with_options(mut self, options: TripOptions) -> Self {
        self.options = options;
        self
    }
}

/// A departure board request for one station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeparturesRequest {
    /// Provider-specific station id
    pub station_id: String,
    /// Start of the board
    pub time: DateTime<Utc>,
    /// Upper bound on returned departures
    pub max_departures: u16,
    /// Also list arrival-only services
    pub include_arrivals: bool,
}

/// A nearby-locations request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyRequest {
    /// Location kinds to return
    pub types: Vec<LocationKind>,
    /// Search centre
    pub location: Location,
    /// Search radius in meters
    pub max_distance_m: u32,
    /// Upper bound on returned locations
    pub max_locations: u16,
}

impl NearbyRequest {
    /// Whether the given location kind was asked for
    #[must_use]
    pub fn wants(&self, kind: LocationKind) -> bool {
        self.types.contains(&kind)
    }
}
