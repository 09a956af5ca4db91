//! Location value object
//!
//! Every query takes or returns locations. A location is discriminated by
//! [`LocationKind`]; the constructors enforce that a `Coord` location always
//! carries coordinates and a `Station` always carries an id.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Point;
use crate::errors::DomainError;

/// Kind of a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    /// Free-text address, optionally with coordinates
    Address,
    /// Bare coordinates, optionally labelled
    Coord,
    /// Transit station or stop with a provider-specific id
    Station,
    /// Point of interest
    Poi,
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Address => "address",
            Self::Coord => "coord",
            Self::Station => "station",
            Self::Poi => "poi",
        };
        f.write_str(name)
    }
}

/// An immutable location value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LocationRepr", into = "LocationRepr")]
pub struct Location {
    kind: LocationKind,
    id: Option<String>,
    label: Option<String>,
    coord: Option<Point>,
}

impl Location {
    /// Create an address location
    #[must_use]
    pub const fn address(label: Option<String>, coord: Option<Point>) -> Self {
        Self {
            kind: LocationKind::Address,
            id: None,
            label,
            coord,
        }
    }

    /// Create an unlabelled coordinate location
    #[must_use]
    pub const fn coord(latitude: f64, longitude: f64) -> Self {
        Self {
            kind: LocationKind::Coord,
            id: None,
            label: None,
            coord: Some(Point::new(latitude, longitude)),
        }
    }

    /// Create a coordinate location carrying a label
    #[must_use]
    pub fn labelled_coord(point: Point, label: impl Into<String>) -> Self {
        Self {
            kind: LocationKind::Coord,
            id: None,
            label: Some(label.into()),
            coord: Some(point),
        }
    }

    /// Create a station location
    #[must_use]
    pub fn station(id: impl Into<String>, name: Option<String>, coord: Option<Point>) -> Self {
        Self {
            kind: LocationKind::Station,
            id: Some(id.into()),
            label: name,
            coord,
        }
    }

    /// Create a point-of-interest location
    #[must_use]
    pub fn poi(id: Option<String>, name: Option<String>, coord: Option<Point>) -> Self {
        Self {
            kind: LocationKind::Poi,
            id,
            label: name,
            coord,
        }
    }

    /// Get the location kind
    #[must_use]
    pub const fn kind(&self) -> LocationKind {
        self.kind
    }

    /// Provider-specific identifier (stations, some POIs)
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Human-readable label or station name
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Coordinates, if known
    #[must_use]
    pub const fn point(&self) -> Option<Point> {
        self.coord
    }

    /// Whether this location has coordinates
    #[must_use]
    pub const fn has_point(&self) -> bool {
        self.coord.is_some()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.label, &self.id, &self.coord) {
            (Some(label), _, _) => write!(f, "{label}"),
            (None, Some(id), _) => write!(f, "{}:{id}", self.kind),
            (None, None, Some(point)) => write!(f, "{point}"),
            (None, None, None) => write!(f, "{}:?", self.kind),
        }
    }
}

/// Wire shape of a [`Location`], validated on the way in
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LocationRepr {
    kind: LocationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    longitude: Option<f64>,
}

impl TryFrom<LocationRepr> for Location {
    type Error = DomainError;

    fn try_from(repr: LocationRepr) -> Result<Self, Self::Error> {
        let coord = match (repr.latitude, repr.longitude) {
            (Some(lat), Some(lon)) => Some(Point::new(lat, lon)),
            (None, None) => None,
            _ => {
                return Err(DomainError::InvalidLocation(
                    "latitude and longitude must be given together".to_string(),
                ));
            },
        };

        match repr.kind {
            LocationKind::Coord if coord.is_none() => Err(DomainError::InvalidLocation(
                "coord location requires coordinates".to_string(),
            )),
            LocationKind::Station if repr.id.as_deref().is_none_or(str::is_empty) => Err(
                DomainError::InvalidLocation("station location requires an id".to_string()),
            ),
            kind => Ok(Self {
                kind,
                id: repr.id,
                label: repr.label,
                coord,
            }),
        }
    }
}

impl From<Location> for LocationRepr {
    fn from(location: Location) -> Self {
        Self {
            kind: location.kind,
            id: location.id,
            label: location.label,
            latitude: location.coord.map(|p| p.latitude()),
            longitude: location.coord.map(|p| p.longitude()),
        }
    }
}
