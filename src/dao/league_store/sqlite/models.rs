use serde::Deserialize;
use serde_json::{Map, Value};
use sqlx::FromRow;
use time::OffsetDateTime;
use tracing::warn;

use super::error::SqliteDaoError;
use crate::dao::models::{
    GameEntity, GameStatus, MatchEntity, PlayEntity, PlayerEntity, SanctionEntity, TeamEntity,
    TeamRefEntity,
};

#[derive(Debug, FromRow)]
pub struct SqliteTeamRow {
    pub id: String,
    pub name: String,
    pub logo: Option<String>,
    pub city: Option<String>,
    pub created_at: i64,
    /// JSON array produced by `json_group_array`, absent for single-team lookups.
    #[sqlx(default)]
    pub players: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AggregatedPlayer {
    id: String,
    name: String,
    number: String,
}

impl SqliteTeamRow {
    /// Convert the row, decoding the aggregated players column when present.
    pub fn into_entity(self) -> TeamEntity {
        let players = match self.players.as_deref() {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<AggregatedPlayer>>(raw) {
                Ok(players) => players
                    .into_iter()
                    .map(|player| PlayerEntity {
                        id: player.id,
                        team_id: self.id.clone(),
                        name: player.name,
                        number: player.number,
                    })
                    .collect(),
                Err(err) => {
                    warn!(team_id = %self.id, error = %err, "malformed players aggregation; using empty roster");
                    Vec::new()
                }
            },
        };

        TeamEntity {
            id: self.id,
            name: self.name,
            logo: self.logo,
            city: self.city,
            created_at: millis_to_datetime(self.created_at),
            players,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct SqlitePlayerRow {
    pub id: String,
    pub team_id: String,
    pub name: String,
    pub number: String,
}

impl From<SqlitePlayerRow> for PlayerEntity {
    fn from(row: SqlitePlayerRow) -> Self {
        Self {
            id: row.id,
            team_id: row.team_id,
            name: row.name,
            number: row.number,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct SqlitePlayerProfileRow {
    pub id: String,
    pub team_id: String,
    pub name: String,
    pub number: String,
    pub team_name: String,
}

#[derive(Debug, FromRow)]
pub struct SqliteGameRow {
    pub id: i64,
    pub team_a_id: String,
    pub team_a_name: String,
    pub team_b_id: String,
    pub team_b_name: String,
    pub final_score_a: i32,
    pub final_score_b: i32,
    pub period: i32,
    pub status: String,
    pub stats: Option<String>,
    pub settings: Option<String>,
    pub created_at: i64,
}

impl TryFrom<SqliteGameRow> for GameEntity {
    type Error = SqliteDaoError;

    fn try_from(row: SqliteGameRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<GameStatus>()
            .map_err(|source| SqliteDaoError::CorruptRow {
                table: "games",
                source,
            })?;

        Ok(Self {
            stats: decode_payload(row.id, "stats", row.stats.as_deref()),
            settings: decode_payload(row.id, "settings", row.settings.as_deref()),
            id: row.id,
            team_a: TeamRefEntity {
                id: row.team_a_id,
                name: row.team_a_name,
            },
            team_b: TeamRefEntity {
                id: row.team_b_id,
                name: row.team_b_name,
            },
            final_score_a: row.final_score_a,
            final_score_b: row.final_score_b,
            period: row.period,
            status,
            created_at: millis_to_datetime(row.created_at),
        })
    }
}

#[derive(Debug, FromRow)]
pub struct SqlitePlayRow {
    pub team: String,
    pub player_name: Option<String>,
    pub player_number: Option<String>,
    pub delta: i32,
    pub score_a: i32,
    pub score_b: i32,
    pub period: i32,
    pub timestamp: i64,
}

impl From<SqlitePlayRow> for PlayEntity {
    fn from(row: SqlitePlayRow) -> Self {
        Self {
            team: row.team,
            player_name: row.player_name,
            player_number: row.player_number,
            delta: row.delta,
            score_a: row.score_a,
            score_b: row.score_b,
            period: row.period,
            timestamp: row.timestamp,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct SqliteSanctionRow {
    pub team: String,
    pub player_name: Option<String>,
    pub player_number: Option<String>,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub period: i32,
    pub timestamp: i64,
}

impl From<SqliteSanctionRow> for SanctionEntity {
    fn from(row: SqliteSanctionRow) -> Self {
        Self {
            team: row.team,
            player_name: row.player_name,
            player_number: row.player_number,
            kind: row.kind,
            period: row.period,
            timestamp: row.timestamp,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct SqliteMatchRow {
    pub id: i64,
    pub home_team_id: String,
    pub home_team_name: String,
    pub away_team_id: String,
    pub away_team_name: String,
    pub date_time: i64,
}

impl From<SqliteMatchRow> for MatchEntity {
    fn from(row: SqliteMatchRow) -> Self {
        Self {
            id: row.id,
            home_team: TeamRefEntity {
                id: row.home_team_id,
                name: row.home_team_name,
            },
            away_team: TeamRefEntity {
                id: row.away_team_id,
                name: row.away_team_name,
            },
            date_time: millis_to_datetime(row.date_time),
        }
    }
}

/// Parse a stored JSON blob, falling back to `{}` when it is missing or unreadable.
pub fn decode_payload(game_id: i64, column: &'static str, raw: Option<&str>) -> Value {
    let Some(raw) = raw else {
        return Value::Object(Map::new());
    };

    match serde_json::from_str(raw) {
        Ok(Value::Null) => Value::Object(Map::new()),
        Ok(value) => value,
        Err(err) => {
            warn!(game_id, column, error = %err, "malformed stored payload; using empty object");
            Value::Object(Map::new())
        }
    }
}

/// Encode an opaque blob for storage; `None` becomes NULL.
pub fn encode_payload(
    column: &'static str,
    value: Option<&Value>,
) -> Result<Option<String>, SqliteDaoError> {
    value
        .map(|value| {
            serde_json::to_string(value)
                .map_err(|source| SqliteDaoError::EncodePayload { column, source })
        })
        .transpose()
}

pub fn datetime_to_millis(value: OffsetDateTime) -> i64 {
    (value.unix_timestamp_nanos() / 1_000_000) as i64
}

pub fn millis_to_datetime(millis: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .unwrap_or(OffsetDateTime::UNIX_EPOCH)
}
