//! Location building

use application::QueryFacade;
use axum::{
    Json,
    extract::{Query, rejection::QueryRejection},
};
use domain::Location;
use serde::Deserialize;
use tracing::instrument;

use crate::error::ApiError;

/// A raw coordinate pair
///
/// Values are passed through unchecked; range checks are left to providers.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CoordinateQuery {
    pub latitude: f64,
    pub longitude: f64,
}

/// Build an address location from coordinates
///
/// GET /v1/locations/address?latitude=..&longitude=..
#[instrument]
pub async fn make_address_location(
    query: Result<Query<CoordinateQuery>, QueryRejection>,
) -> Result<Json<Location>, ApiError> {
    let Query(coords) = query?;
    Ok(Json(QueryFacade::make_address_location(
        coords.latitude,
        coords.longitude,
    )))
}
