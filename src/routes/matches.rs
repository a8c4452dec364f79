use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use crate::{
    dto::{
        common::{ErrorResponse, MessageResponse},
        matchup::{CreateMatchRequest, MatchView},
    },
    error::AppError,
    routes::extract::ApiJson,
    services::match_service,
    state::SharedState,
};

/// Routes scheduling matches.
pub fn router() -> Router<SharedState> {
    Router::new().route("/matches", get(list_matches).post(create_match))
}

/// Schedule a match between two registered teams.
#[utoipa::path(
    post,
    path = "/api/matches",
    tag = "matches",
    request_body = CreateMatchRequest,
    responses(
        (status = 201, description = "Match created", body = MessageResponse),
        (status = 500, description = "Unknown team or storage failure", body = ErrorResponse)
    )
)]
pub async fn create_match(
    State(state): State<SharedState>,
    ApiJson(payload): ApiJson<CreateMatchRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let response = match_service::create_match(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// List scheduled matches, most recent date first.
#[utoipa::path(
    get,
    path = "/api/matches",
    tag = "matches",
    responses(
        (status = 200, description = "Scheduled matches", body = [MatchView]),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_matches(
    State(state): State<SharedState>,
) -> Result<Json<Vec<MatchView>>, AppError> {
    let matches = match_service::list_matches(&state).await?;
    Ok(Json(matches))
}
