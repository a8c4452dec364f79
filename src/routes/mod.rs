//! HTTP surface of the league API.

use axum::Router;

use crate::state::SharedState;

/// Swagger UI and OpenAPI JSON.
pub mod docs;
/// Extractors answering rejections with JSON errors.
pub mod extract;
/// Recorded games.
pub mod games;
/// Health check.
pub mod health;
/// Scheduled matches.
pub mod matches;
/// PDF downloads.
pub mod reports;
/// Teams, players and rosters.
pub mod teams;

/// Compose all route trees under `/api`, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(teams::router())
        .merge(games::router())
        .merge(matches::router())
        .merge(reports::router());

    Router::new()
        .nest("/api", api_router)
        .merge(docs::router())
        .with_state(state)
}
