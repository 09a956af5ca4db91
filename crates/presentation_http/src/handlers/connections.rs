//! Connection search

use application::QueryOutcome;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use domain::{Location, QueryTripsResult};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Request body for a connection search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionRequest {
    /// Provider id; the default provider is used when absent or unknown
    #[serde(default)]
    pub provider: Option<String>,
    /// Origin
    pub from: Location,
    /// Destination
    pub to: Location,
    /// Minutes from now to depart (may be negative)
    #[serde(default)]
    pub departure_delay_minutes: i32,
}

/// Calculate connections between two locations
///
/// POST /v1/connections
#[instrument(skip(state, body))]
pub async fn calculate_connection(
    State(state): State<AppState>,
    body: Result<Json<ConnectionRequest>, JsonRejection>,
) -> Result<Json<QueryOutcome<QueryTripsResult>>, ApiError> {
    let Json(request) = body?;
    let outcome = state
        .facade
        .calculate_connection(
            request.provider.as_deref(),
            request.from,
            request.to,
            request.departure_delay_minutes,
        )
        .await;
    Ok(Json(outcome))
}
