use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dao::models::{NewTeamEntity, PlayerEntity, TeamEntity},
    dto::format_timestamp,
};

/// Payload used to register a team. The identifier is chosen by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTeamRequest {
    /// Unique team identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// URI or inline image data; stored verbatim.
    #[serde(default)]
    pub logo: Option<String>,
    /// Home city.
    #[serde(default)]
    pub city: Option<String>,
}

impl From<CreateTeamRequest> for NewTeamEntity {
    fn from(request: CreateTeamRequest) -> Self {
        Self {
            id: request.id,
            name: request.name,
            logo: request.logo,
            city: request.city,
        }
    }
}

/// Payload used to add a player to a team's roster.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddPlayerRequest {
    /// Unique player identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Jersey number, kept as text ("00" and "7" are different numbers).
    pub number: String,
}

/// Team with its roster as exposed to REST clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamView {
    /// Team identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Logo as stored, if any.
    pub logo: Option<String>,
    /// Home city, if any.
    pub city: Option<String>,
    /// RFC 3339 creation time.
    pub created_at: String,
    /// Roster ordered by jersey number.
    pub players: Vec<PlayerView>,
}

/// Rostered player as exposed to REST clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    /// Player identifier.
    pub id: String,
    /// Owning team.
    pub team_id: String,
    /// Display name.
    pub name: String,
    /// Jersey number.
    pub number: String,
}

impl From<PlayerEntity> for PlayerView {
    fn from(player: PlayerEntity) -> Self {
        Self {
            id: player.id,
            team_id: player.team_id,
            name: player.name,
            number: player.number,
        }
    }
}

impl From<TeamEntity> for TeamView {
    fn from(team: TeamEntity) -> Self {
        Self {
            id: team.id,
            name: team.name,
            logo: team.logo,
            city: team.city,
            created_at: format_timestamp(team.created_at),
            players: team.players.into_iter().map(Into::into).collect(),
        }
    }
}
