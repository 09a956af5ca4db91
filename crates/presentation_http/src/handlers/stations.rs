//! Nearby station search

use application::QueryOutcome;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use domain::NearbyLocationsResult;
use serde::Deserialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Nearby search parameters
#[derive(Debug, Clone, Deserialize)]
pub struct NearbyQuery {
    #[serde(default)]
    pub provider: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Stations near a coordinate
///
/// GET /v1/stations/nearby?provider=..&latitude=..&longitude=..
#[instrument(skip(state, query))]
pub async fn get_nearest_stations(
    State(state): State<AppState>,
    query: Result<Query<NearbyQuery>, QueryRejection>,
) -> Result<Json<QueryOutcome<NearbyLocationsResult>>, ApiError> {
    let Query(query) = query?;
    let outcome = state
        .facade
        .get_nearest_stations(query.provider.as_deref(), query.latitude, query.longitude)
        .await;
    Ok(Json(outcome))
}
