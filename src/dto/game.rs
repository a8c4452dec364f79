use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    dao::models::{
        GameDetailEntity, GameEntity, GameStatus, NewGameEntity, PlayEntity, SanctionEntity,
        TeamRefEntity,
    },
    dto::format_timestamp,
};

/// Id and name of a team as they were when the game was played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TeamRef {
    /// Team identifier.
    pub id: String,
    /// Team name.
    pub name: String,
}

impl From<TeamRef> for TeamRefEntity {
    fn from(value: TeamRef) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<TeamRefEntity> for TeamRef {
    fn from(value: TeamRefEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

/// One scoring play of the game log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Play {
    /// Side that scored ("A" or "B" in the scoreboard UI).
    pub team: String,
    /// Player involved, when known.
    #[serde(default)]
    pub player_name: Option<String>,
    /// Jersey number of that player.
    #[serde(default)]
    pub player_number: Option<String>,
    /// Score change; negative values undo a previous play.
    pub delta: i32,
    /// Score of team A after the play.
    pub score_a: i32,
    /// Score of team B after the play.
    pub score_b: i32,
    /// Period of the event.
    pub period: i32,
    /// Epoch milliseconds. The scoreboard sends it as `t`.
    #[serde(alias = "t")]
    pub timestamp: i64,
}

/// One sanction of the game log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sanction {
    /// Side the sanction applies to.
    pub team: String,
    /// Player involved, when known.
    #[serde(default)]
    pub player_name: Option<String>,
    /// Jersey number of that player.
    #[serde(default)]
    pub player_number: Option<String>,
    /// Sanction type (personal, technical, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Period of the event.
    pub period: i32,
    /// Epoch milliseconds. The scoreboard sends it as `t`.
    #[serde(alias = "t")]
    pub timestamp: i64,
}

/// Final state of a finished game, submitted by the scoreboard in one request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveGameRequest {
    /// Team A as it was at save time.
    #[serde(rename = "teamA")]
    pub team_a: TeamRef,
    /// Team B as it was at save time.
    #[serde(rename = "teamB")]
    pub team_b: TeamRef,
    /// Final score of team A.
    #[serde(rename = "finalScoreA")]
    pub final_score_a: i32,
    /// Final score of team B.
    #[serde(rename = "finalScoreB")]
    pub final_score_b: i32,
    /// Last period played.
    pub period: i32,
    /// How the game ended.
    pub status: GameStatus,
    /// Opaque statistics blob, stored as-is.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub stats: Option<Value>,
    /// Scoring plays, any order.
    #[serde(default)]
    pub history: Vec<Play>,
    /// Sanctions, any order.
    #[serde(default)]
    pub sanctions: Vec<Sanction>,
    /// Opaque scoreboard settings blob, stored as-is.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub settings: Option<Value>,
}

/// Acknowledgement of a saved game.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveGameResponse {
    /// Human readable outcome.
    pub message: String,
    /// Identifier of the saved game.
    pub game_id: i64,
}

/// Recorded game. `history` and `sanctions` are only present on single-game lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    /// Game identifier.
    pub id: i64,
    /// Team A as it was at save time.
    #[serde(rename = "teamA")]
    pub team_a: TeamRef,
    /// Team B as it was at save time.
    #[serde(rename = "teamB")]
    pub team_b: TeamRef,
    /// Final score of team A.
    #[serde(rename = "finalScoreA")]
    pub final_score_a: i32,
    /// Final score of team B.
    #[serde(rename = "finalScoreB")]
    pub final_score_b: i32,
    /// Last period played.
    pub period: i32,
    /// How the game ended.
    pub status: GameStatus,
    /// Statistics blob; `{}` when none was stored.
    #[schema(value_type = Object)]
    pub stats: Value,
    /// Scoreboard settings; `{}` when none was stored.
    #[schema(value_type = Object)]
    pub settings: Value,
    /// RFC 3339 save time.
    pub created_at: String,
    /// Plays, newest first. Single-game lookups only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<Play>>,
    /// Sanctions, newest first. Single-game lookups only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanctions: Option<Vec<Sanction>>,
}

impl From<Play> for PlayEntity {
    fn from(play: Play) -> Self {
        Self {
            team: play.team,
            player_name: play.player_name,
            player_number: play.player_number,
            delta: play.delta,
            score_a: play.score_a,
            score_b: play.score_b,
            period: play.period,
            timestamp: play.timestamp,
        }
    }
}

impl From<PlayEntity> for Play {
    fn from(play: PlayEntity) -> Self {
        Self {
            team: play.team,
            player_name: play.player_name,
            player_number: play.player_number,
            delta: play.delta,
            score_a: play.score_a,
            score_b: play.score_b,
            period: play.period,
            timestamp: play.timestamp,
        }
    }
}

impl From<Sanction> for SanctionEntity {
    fn from(sanction: Sanction) -> Self {
        Self {
            team: sanction.team,
            player_name: sanction.player_name,
            player_number: sanction.player_number,
            kind: sanction.kind,
            period: sanction.period,
            timestamp: sanction.timestamp,
        }
    }
}

impl From<SanctionEntity> for Sanction {
    fn from(sanction: SanctionEntity) -> Self {
        Self {
            team: sanction.team,
            player_name: sanction.player_name,
            player_number: sanction.player_number,
            kind: sanction.kind,
            period: sanction.period,
            timestamp: sanction.timestamp,
        }
    }
}

impl From<SaveGameRequest> for NewGameEntity {
    fn from(request: SaveGameRequest) -> Self {
        Self {
            team_a: request.team_a.into(),
            team_b: request.team_b.into(),
            final_score_a: request.final_score_a,
            final_score_b: request.final_score_b,
            period: request.period,
            status: request.status,
            stats: request.stats,
            settings: request.settings,
            history: request.history.into_iter().map(Into::into).collect(),
            sanctions: request.sanctions.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<GameEntity> for GameView {
    fn from(game: GameEntity) -> Self {
        Self {
            id: game.id,
            team_a: game.team_a.into(),
            team_b: game.team_b.into(),
            final_score_a: game.final_score_a,
            final_score_b: game.final_score_b,
            period: game.period,
            status: game.status,
            stats: game.stats,
            settings: game.settings,
            created_at: format_timestamp(game.created_at),
            history: None,
            sanctions: None,
        }
    }
}

impl From<GameDetailEntity> for GameView {
    fn from(detail: GameDetailEntity) -> Self {
        let mut view: GameView = detail.game.into();
        view.history = Some(detail.history.into_iter().map(Into::into).collect());
        view.sanctions = Some(detail.sanctions.into_iter().map(Into::into).collect());
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scoreboard_payload_with_short_timestamps_is_accepted() {
        let request: SaveGameRequest = serde_json::from_value(json!({
            "teamA": {"id": "a", "name": "Aguilas"},
            "teamB": {"id": "b", "name": "Bisontes"},
            "finalScoreA": 10,
            "finalScoreB": 8,
            "period": 4,
            "status": "suspended",
            "history": [
                {"team": "A", "playerName": "Ana", "playerNumber": "7",
                 "delta": 2, "scoreA": 2, "scoreB": 0, "period": 1, "t": 1700000000000i64}
            ],
            "sanctions": [
                {"team": "B", "type": "technical", "period": 3, "t": 1700000001000i64}
            ]
        }))
        .unwrap();

        assert_eq!(request.status, GameStatus::Suspended);
        assert_eq!(request.history[0].timestamp, 1_700_000_000_000);
        assert_eq!(request.sanctions[0].kind, "technical");
        assert_eq!(request.sanctions[0].player_name, None);
        assert!(request.stats.is_none());
    }

    #[test]
    fn missing_logs_default_to_empty() {
        let request: SaveGameRequest = serde_json::from_value(json!({
            "teamA": {"id": "a", "name": "Aguilas"},
            "teamB": {"id": "b", "name": "Bisontes"},
            "finalScoreA": 0,
            "finalScoreB": 0,
            "period": 1,
            "status": "cancelled",
            "stats": {"possession": "A"}
        }))
        .unwrap();

        assert!(request.history.is_empty());
        assert!(request.sanctions.is_empty());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result = serde_json::from_value::<SaveGameRequest>(json!({
            "teamA": {"id": "a", "name": "Aguilas"},
            "teamB": {"id": "b", "name": "Bisontes"},
            "finalScoreA": 0,
            "finalScoreB": 0,
            "period": 1,
            "status": "abandoned"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn game_listing_view_omits_event_logs() {
        let view = GameView {
            id: 3,
            team_a: TeamRef {
                id: "a".into(),
                name: "Aguilas".into(),
            },
            team_b: TeamRef {
                id: "b".into(),
                name: "Bisontes".into(),
            },
            final_score_a: 1,
            final_score_b: 2,
            period: 4,
            status: GameStatus::Completed,
            stats: json!({}),
            settings: json!({}),
            created_at: "2025-01-01T00:00:00Z".into(),
            history: None,
            sanctions: None,
        };

        let value = serde_json::to_value(&view).unwrap();
        assert!(value.get("history").is_none());
        assert_eq!(value["teamA"]["name"], "Aguilas");
        assert_eq!(value["finalScoreB"], 2);
    }
}
