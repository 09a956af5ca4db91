//! Nearby location results

use serde::{Deserialize, Serialize};

use crate::value_objects::Location;

/// A location found near a search centre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyLocation {
    /// The location
    pub location: Location,
    /// Distance from the search centre in meters
    pub distance_m: u32,
}

/// Result of a nearby-locations query, closest first
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NearbyLocationsResult {
    /// Found locations
    pub locations: Vec<NearbyLocation>,
}
