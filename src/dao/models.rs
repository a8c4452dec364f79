//! Backend-agnostic entities exchanged with the league store.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use utoipa::ToSchema;

/// Team registered in the league together with its roster.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamEntity {
    /// Caller supplied identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Logo as URI or inline data, stored verbatim.
    pub logo: Option<String>,
    /// Home city, when known.
    pub city: Option<String>,
    /// Insertion time.
    pub created_at: OffsetDateTime,
    /// Rostered players.
    pub players: Vec<PlayerEntity>,
}

/// Player rostered on a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerEntity {
    /// Caller supplied identifier.
    pub id: String,
    /// Owning team.
    pub team_id: String,
    /// Display name.
    pub name: String,
    /// Jersey number; free-form text.
    pub number: String,
}

/// Payload used to register a new team.
#[derive(Debug, Clone)]
pub struct NewTeamEntity {
    /// Caller supplied identifier; must be unique.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Logo as URI or inline data.
    pub logo: Option<String>,
    /// Home city, when known.
    pub city: Option<String>,
}

/// Player together with the team it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProfileEntity {
    /// The player itself.
    pub player: PlayerEntity,
    /// Current name of the owning team.
    pub team_name: String,
}

/// Id and name snapshot of a team taken when a game is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRefEntity {
    /// Team identifier at save time.
    pub id: String,
    /// Team name at save time.
    pub name: String,
}

/// Final state of a recorded game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Played to the end.
    Completed,
    /// Abandoned before the end.
    Cancelled,
    /// Interrupted, may resume later.
    Suspended,
}

impl GameStatus {
    /// Column value stored for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::Completed => "completed",
            GameStatus::Cancelled => "cancelled",
            GameStatus::Suspended => "suspended",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored status is not one of the known values.
#[derive(Debug, thiserror::Error)]
#[error("unknown game status `{0}`")]
pub struct UnknownGameStatus(pub String);

impl FromStr for GameStatus {
    type Err = UnknownGameStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "completed" => Ok(GameStatus::Completed),
            "cancelled" => Ok(GameStatus::Cancelled),
            "suspended" => Ok(GameStatus::Suspended),
            other => Err(UnknownGameStatus(other.to_owned())),
        }
    }
}

/// Single scoring play from the game log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayEntity {
    /// Side the event belongs to (`A` or `B`).
    pub team: String,
    /// Player involved, when known.
    pub player_name: Option<String>,
    /// Jersey number of that player.
    pub player_number: Option<String>,
    /// Score change produced by the play; negative for corrections.
    pub delta: i32,
    /// Score of team A after the play.
    pub score_a: i32,
    /// Score of team B after the play.
    pub score_b: i32,
    /// Period in which the event happened.
    pub period: i32,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

/// Sanction (foul, technical, ...) from the game log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanctionEntity {
    /// Side the event belongs to (`A` or `B`).
    pub team: String,
    /// Player involved, when known.
    pub player_name: Option<String>,
    /// Jersey number of that player.
    pub player_number: Option<String>,
    /// Sanction type as sent by the scoreboard.
    pub kind: String,
    /// Period in which the event happened.
    pub period: i32,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

/// Everything needed to persist a finished game in one unit.
#[derive(Debug, Clone)]
pub struct NewGameEntity {
    /// Snapshot of team A.
    pub team_a: TeamRefEntity,
    /// Snapshot of team B.
    pub team_b: TeamRefEntity,
    /// Final score of team A.
    pub final_score_a: i32,
    /// Final score of team B.
    pub final_score_b: i32,
    /// Last period played.
    pub period: i32,
    /// How the game ended.
    pub status: GameStatus,
    /// Opaque statistics blob; `None` is stored as NULL.
    pub stats: Option<Value>,
    /// Opaque scoreboard settings blob; `None` is stored as NULL.
    pub settings: Option<Value>,
    /// Plays in input order.
    pub history: Vec<PlayEntity>,
    /// Sanctions in input order.
    pub sanctions: Vec<SanctionEntity>,
}

/// Stored game header, without its event logs.
#[derive(Debug, Clone, PartialEq)]
pub struct GameEntity {
    /// Autoincrement identifier.
    pub id: i64,
    /// Snapshot of team A.
    pub team_a: TeamRefEntity,
    /// Snapshot of team B.
    pub team_b: TeamRefEntity,
    /// Final score of team A.
    pub final_score_a: i32,
    /// Final score of team B.
    pub final_score_b: i32,
    /// Last period played.
    pub period: i32,
    /// How the game ended.
    pub status: GameStatus,
    /// Decoded statistics; empty object when absent or unreadable.
    pub stats: Value,
    /// Decoded settings; empty object when absent or unreadable.
    pub settings: Value,
    /// Insertion time.
    pub created_at: OffsetDateTime,
}

/// Game header joined with both event logs, most recent event first.
#[derive(Debug, Clone, PartialEq)]
pub struct GameDetailEntity {
    /// Game header.
    pub game: GameEntity,
    /// Plays, newest first.
    pub history: Vec<PlayEntity>,
    /// Sanctions, newest first.
    pub sanctions: Vec<SanctionEntity>,
}

/// Payload used to schedule a match between two registered teams.
#[derive(Debug, Clone)]
pub struct NewMatchEntity {
    /// Home team identifier.
    pub home_team_id: String,
    /// Away team identifier.
    pub away_team_id: String,
    /// Scheduled tip-off, UTC.
    pub date_time: OffsetDateTime,
}

/// Scheduled match with the current names of both teams.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchEntity {
    /// Autoincrement identifier.
    pub id: i64,
    /// Home team id and current name.
    pub home_team: TeamRefEntity,
    /// Away team id and current name.
    pub away_team: TeamRefEntity,
    /// Scheduled tip-off, UTC.
    pub date_time: OffsetDateTime,
}

/// Match with the full roster of both teams.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRosterEntity {
    /// The match itself.
    pub matchup: MatchEntity,
    /// Home roster ordered by jersey number.
    pub home_players: Vec<PlayerEntity>,
    /// Away roster ordered by jersey number.
    pub away_players: Vec<PlayerEntity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_status_round_trips_through_column_value() {
        for status in [
            GameStatus::Completed,
            GameStatus::Cancelled,
            GameStatus::Suspended,
        ] {
            assert_eq!(status.as_str().parse::<GameStatus>().unwrap(), status);
        }
    }

    #[test]
    fn game_status_rejects_unknown_values() {
        assert!("finished".parse::<GameStatus>().is_err());
        assert!("Completed".parse::<GameStatus>().is_err());
    }
}
