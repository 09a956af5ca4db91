//! Domain entities - Query parameters and provider answers

mod departure;
mod line;
mod nearby;
mod query;
mod trip;

pub use departure::{Departure, QueryDeparturesResult, StationDepartures};
pub use line::{Line, Product};
pub use nearby::{NearbyLocation, NearbyLocationsResult};
pub use query::{
    Accessibility, DeparturesRequest, NearbyRequest, Optimize, TripOptions, TripRequest, WalkSpeed,
};
pub use trip::{Leg, QueryTripsResult, Trip, TripContext};
