//! Provider listing

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::state::AppState;

/// Registered provider ids
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersResponse {
    /// All ids, in registration order
    pub providers: Vec<String>,
    /// Id used when a request names no or an unknown provider
    pub default: String,
}

/// List supported providers
///
/// GET /v1/providers
#[instrument(skip(state))]
pub async fn list_providers(State(state): State<AppState>) -> Json<ProvidersResponse> {
    Json(ProvidersResponse {
        providers: state.facade.list_provider_ids(),
        default: state.facade.registry().default_id().to_string(),
    })
}
