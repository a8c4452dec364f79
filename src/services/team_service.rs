//! Team and roster management behind the `/api/teams` and `/api/players` routes.

use tracing::{debug, info};

use crate::{
    dao::models::PlayerEntity,
    dto::{
        common::MessageResponse,
        team::{AddPlayerRequest, CreateTeamRequest, PlayerView, TeamView},
    },
    error::ServiceError,
    state::SharedState,
};

/// Every team with its nested roster, newest team first.
pub async fn list_teams(state: &SharedState) -> Result<Vec<TeamView>, ServiceError> {
    let teams = state.store().list_teams().await?;
    debug!(count = teams.len(), "listed teams");
    Ok(teams.into_iter().map(Into::into).collect())
}

/// Register a team under the caller supplied identifier.
pub async fn create_team(
    state: &SharedState,
    request: CreateTeamRequest,
) -> Result<MessageResponse, ServiceError> {
    let id = request.id.clone();
    state.store().create_team(request.into()).await?;
    info!(team_id = %id, "team created");
    Ok(MessageResponse::with_id("Team created", id))
}

/// Remove a team and its players. Unknown identifiers are not an error; teams
/// still scheduled in a match are refused untouched.
pub async fn delete_team(state: &SharedState, id: String) -> Result<MessageResponse, ServiceError> {
    state.store().delete_team(id.clone()).await?;
    info!(team_id = %id, "team deleted");
    Ok(MessageResponse::new("Team deleted"))
}

/// Add a player to an existing team's roster.
pub async fn add_player(
    state: &SharedState,
    team_id: String,
    request: AddPlayerRequest,
) -> Result<MessageResponse, ServiceError> {
    let player = PlayerEntity {
        id: request.id,
        team_id,
        name: request.name,
        number: request.number,
    };
    let id = player.id.clone();
    let team_id = player.team_id.clone();
    state.store().add_player(player).await?;
    info!(player_id = %id, %team_id, "player added");
    Ok(MessageResponse::with_id("Player added", id))
}

/// Remove a player. Unknown identifiers are not an error.
pub async fn delete_player(
    state: &SharedState,
    id: String,
) -> Result<MessageResponse, ServiceError> {
    state.store().delete_player(id.clone()).await?;
    info!(player_id = %id, "player deleted");
    Ok(MessageResponse::new("Player deleted"))
}

/// Every rostered player across all teams.
pub async fn list_players(state: &SharedState) -> Result<Vec<PlayerView>, ServiceError> {
    let players = state.store().list_players().await?;
    Ok(players.into_iter().map(Into::into).collect())
}
