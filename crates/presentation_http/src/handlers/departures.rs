//! Departure boards

use application::QueryOutcome;
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};
use domain::QueryDeparturesResult;
use serde::Deserialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Optional provider selection
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderQuery {
    #[serde(default)]
    pub provider: Option<String>,
}

/// Departure board of a station
///
/// GET /v1/departures/{station_id}?provider=..
#[instrument(skip(state, station_id, query))]
pub async fn get_departures(
    State(state): State<AppState>,
    station_id: Result<Path<String>, PathRejection>,
    query: Result<Query<ProviderQuery>, QueryRejection>,
) -> Result<Json<QueryOutcome<QueryDeparturesResult>>, ApiError> {
    let Path(station_id) = station_id?;
    let Query(query) = query?;
    let outcome = state
        .facade
        .get_departures(query.provider.as_deref(), &station_id)
        .await;
    Ok(Json(outcome))
}
