//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
};

use crate::{error::ApiError, handlers, state::AppState};

/// Default request body limit in bytes
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    create_router_with_body_limit(state, DEFAULT_BODY_LIMIT)
}

/// Create the router with a custom request body limit
pub fn create_router_with_body_limit(state: AppState, body_limit: usize) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(handlers::health::health_check))
        // Facade API (v1)
        .route("/v1/providers", get(handlers::providers::list_providers))
        .route(
            "/v1/locations/address",
            get(handlers::locations::make_address_location),
        )
        .route(
            "/v1/connections",
            post(handlers::connections::calculate_connection),
        )
        .route(
            "/v1/departures/{station_id}",
            get(handlers::departures::get_departures),
        )
        .route(
            "/v1/stations/nearby",
            get(handlers::stations::get_nearest_stations),
        )
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        // Attach state
        .with_state(state)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for {}", uri.path()))
}
