use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
};

use crate::{
    dto::{
        common::{ErrorResponse, MessageResponse},
        team::{AddPlayerRequest, CreateTeamRequest, PlayerView, TeamView},
    },
    error::AppError,
    routes::extract::{ApiJson, ApiPath},
    services::team_service,
    state::SharedState,
};

/// Routes managing teams and their rosters.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/teams", get(list_teams).post(create_team))
        .route("/teams/{id}", delete(delete_team))
        .route("/teams/{id}/players", post(add_player))
        .route("/teams/players/{player_id}", delete(delete_player))
        .route("/players", get(list_players))
}

/// List every team with its nested roster, newest first.
#[utoipa::path(
    get,
    path = "/api/teams",
    tag = "teams",
    responses(
        (status = 200, description = "Teams with their players", body = [TeamView]),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_teams(State(state): State<SharedState>) -> Result<Json<Vec<TeamView>>, AppError> {
    let teams = team_service::list_teams(&state).await?;
    Ok(Json(teams))
}

/// Register a new team.
#[utoipa::path(
    post,
    path = "/api/teams",
    tag = "teams",
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created", body = MessageResponse),
        (status = 500, description = "Duplicate id or storage failure", body = ErrorResponse)
    )
)]
pub async fn create_team(
    State(state): State<SharedState>,
    ApiJson(payload): ApiJson<CreateTeamRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let response = team_service::create_team(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Delete a team together with its players.
#[utoipa::path(
    delete,
    path = "/api/teams/{id}",
    tag = "teams",
    params(("id" = String, Path, description = "Identifier of the team")),
    responses(
        (status = 200, description = "Team deleted", body = MessageResponse),
        (status = 500, description = "Team scheduled in a match or storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_team(
    State(state): State<SharedState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let response = team_service::delete_team(&state, id).await?;
    Ok(Json(response))
}

/// Add a player to a team.
#[utoipa::path(
    post,
    path = "/api/teams/{teamId}/players",
    tag = "teams",
    params(("teamId" = String, Path, description = "Identifier of the owning team")),
    request_body = AddPlayerRequest,
    responses(
        (status = 201, description = "Player added", body = MessageResponse),
        (status = 500, description = "Duplicate id, unknown team or storage failure", body = ErrorResponse)
    )
)]
pub async fn add_player(
    State(state): State<SharedState>,
    ApiPath(team_id): ApiPath<String>,
    ApiJson(payload): ApiJson<AddPlayerRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let response = team_service::add_player(&state, team_id, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Delete a player.
#[utoipa::path(
    delete,
    path = "/api/teams/players/{playerId}",
    tag = "teams",
    params(("playerId" = String, Path, description = "Identifier of the player")),
    responses(
        (status = 200, description = "Player deleted", body = MessageResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_player(
    State(state): State<SharedState>,
    ApiPath(player_id): ApiPath<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let response = team_service::delete_player(&state, player_id).await?;
    Ok(Json(response))
}

/// List every rostered player.
#[utoipa::path(
    get,
    path = "/api/players",
    tag = "teams",
    responses(
        (status = 200, description = "All players", body = [PlayerView]),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_players(
    State(state): State<SharedState>,
) -> Result<Json<Vec<PlayerView>>, AppError> {
    let players = team_service::list_players(&state).await?;
    Ok(Json(players))
}
