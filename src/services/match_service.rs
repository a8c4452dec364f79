//! Scheduling matches between registered teams.

use tracing::info;

use crate::{
    dto::{
        common::MessageResponse,
        matchup::{CreateMatchRequest, MatchView},
    },
    error::ServiceError,
    state::SharedState,
};

/// Schedule a match; both teams must exist.
pub async fn create_match(
    state: &SharedState,
    request: CreateMatchRequest,
) -> Result<MessageResponse, ServiceError> {
    let home = request.home_team_id.clone();
    let away = request.away_team_id.clone();
    let id = state.store().create_match(request.into()).await?;
    info!(match_id = id, %home, %away, "match scheduled");
    Ok(MessageResponse::with_id("Match created", id.to_string()))
}

/// Every scheduled match, most recent date first.
pub async fn list_matches(state: &SharedState) -> Result<Vec<MatchView>, ServiceError> {
    let matches = state.store().list_matches().await?;
    Ok(matches.into_iter().map(Into::into).collect())
}
