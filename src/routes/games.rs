use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::{
        common::ErrorResponse,
        game::{GameView, SaveGameRequest, SaveGameResponse},
    },
    error::AppError,
    routes::extract::{ApiJson, ApiPath},
    services::game_service,
    state::SharedState,
};

/// Routes recording and reading finished games.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/games", get(list_games).post(save_game))
        .route("/games/{id}", get(get_game))
}

/// Persist a finished game with its play-by-play history and sanctions.
#[utoipa::path(
    post,
    path = "/api/games",
    tag = "games",
    request_body = SaveGameRequest,
    responses(
        (status = 201, description = "Game saved", body = SaveGameResponse),
        (status = 500, description = "Nothing was saved", body = ErrorResponse)
    )
)]
pub async fn save_game(
    State(state): State<SharedState>,
    ApiJson(payload): ApiJson<SaveGameRequest>,
) -> Result<(StatusCode, Json<SaveGameResponse>), AppError> {
    let response = game_service::save_game(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// List recorded games, newest first.
#[utoipa::path(
    get,
    path = "/api/games",
    tag = "games",
    responses(
        (status = 200, description = "Recorded games", body = [GameView]),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_games(State(state): State<SharedState>) -> Result<Json<Vec<GameView>>, AppError> {
    let games = game_service::list_games(&state).await?;
    Ok(Json(games))
}

/// Fetch one game with its history and sanctions.
#[utoipa::path(
    get,
    path = "/api/games/{id}",
    tag = "games",
    params(("id" = i64, Path, description = "Identifier of the game")),
    responses(
        (status = 200, description = "Game with event logs", body = GameView),
        (status = 404, description = "Unknown game", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn get_game(
    State(state): State<SharedState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<GameView>, AppError> {
    let game = game_service::get_game(&state, id).await?;
    Ok(Json(game))
}
