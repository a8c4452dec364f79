//! Library crate for courtside-back, exposing modules for binaries and integration tests.

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

#[cfg(feature = "client")]
/// Typed HTTP client for the REST API.
pub mod client;
#[cfg(feature = "sqlite-store")]
/// Application configuration loading.
pub mod config;
/// Persistence layer.
pub mod dao;
/// REST payloads.
pub mod dto;
/// Service and HTTP error types.
pub mod error;
/// PDF report model, layouts and writer.
pub mod report;
/// Axum routers.
pub mod routes;
/// Business logic behind the routes.
pub mod services;
/// Shared application state.
pub mod state;

use state::SharedState;

/// Build the top-level router and attach cross-cutting middleware layers.
pub fn build_app(state: SharedState, ui_origin: &str) -> Router<()> {
    routes::router(state)
        .layer(cors_layer(ui_origin))
        .layer(TraceLayer::new_for_http())
}

/// CORS policy admitting the scoreboard UI only.
fn cors_layer(ui_origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    match HeaderValue::from_str(ui_origin) {
        Ok(origin) => cors.allow_origin(AllowOrigin::exact(origin)),
        Err(err) => {
            warn!(%ui_origin, error = %err, "invalid UI origin; cross-origin requests disabled");
            cors
        }
    }
}
