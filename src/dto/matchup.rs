use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::{
    dao::models::{MatchEntity, NewMatchEntity},
    dto::{format_timestamp, game::TeamRef},
};

/// Payload used to schedule a match between two registered teams.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequest {
    /// Home team identifier.
    pub home_team_id: String,
    /// Away team identifier.
    pub away_team_id: String,
    /// RFC 3339 tip-off time.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub date_time: OffsetDateTime,
}

impl From<CreateMatchRequest> for NewMatchEntity {
    fn from(request: CreateMatchRequest) -> Self {
        Self {
            home_team_id: request.home_team_id,
            away_team_id: request.away_team_id,
            date_time: request.date_time,
        }
    }
}

/// Scheduled match with the current names of both teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    /// Match identifier.
    pub id: i64,
    /// Home team id and current name.
    pub home_team: TeamRef,
    /// Away team id and current name.
    pub away_team: TeamRef,
    /// RFC 3339 tip-off time.
    pub date_time: String,
}

impl From<MatchEntity> for MatchView {
    fn from(matchup: MatchEntity) -> Self {
        Self {
            id: matchup.id,
            home_team: matchup.home_team.into(),
            away_team: matchup.away_team.into(),
            date_time: format_timestamp(matchup.date_time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn create_request_parses_rfc3339_date() {
        let request: CreateMatchRequest = serde_json::from_value(json!({
            "homeTeamId": "h",
            "awayTeamId": "a",
            "dateTime": "2025-03-01T18:30:00Z"
        }))
        .unwrap();

        assert_eq!(request.date_time, datetime!(2025-03-01 18:30:00 UTC));
    }

    #[test]
    fn view_formats_the_date_back_to_rfc3339() {
        let view = MatchView::from(MatchEntity {
            id: 4,
            home_team: crate::dao::models::TeamRefEntity {
                id: "h".into(),
                name: "Home".into(),
            },
            away_team: crate::dao::models::TeamRefEntity {
                id: "a".into(),
                name: "Away".into(),
            },
            date_time: datetime!(2025-03-01 18:30:00 UTC),
        });

        assert_eq!(view.date_time, "2025-03-01T18:30:00Z");
        assert_eq!(view.home_team.name, "Home");
    }
}
