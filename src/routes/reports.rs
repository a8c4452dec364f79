use axum::{
    Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    dto::common::ErrorResponse,
    error::AppError,
    routes::extract::ApiPath,
    services::report_service::{self, ReportFile},
    state::SharedState,
};

/// Routes serving PDF reports as downloads.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/reports/teams", get(teams_report))
        .route("/reports/teams/{team_id}/players", get(players_report))
        .route("/reports/matches/history", get(match_history_report))
        .route("/reports/matches/{match_id}/roster", get(match_roster_report))
        .route("/reports/players/{player_id}/stats", get(player_stats_report))
}

fn attachment(file: ReportFile) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.filename),
            ),
        ],
        file.bytes,
    )
        .into_response()
}

/// Registered teams, ordered by name.
#[utoipa::path(
    get,
    path = "/api/reports/teams",
    tag = "reports",
    responses(
        (status = 200, description = "PDF document", content_type = "application/pdf", body = Vec<u8>),
        (status = 500, description = "Storage or rendering failure", body = ErrorResponse)
    )
)]
pub async fn teams_report(State(state): State<SharedState>) -> Result<Response, AppError> {
    let file = report_service::teams_report(&state).await?;
    Ok(attachment(file))
}

/// Roster of one team.
#[utoipa::path(
    get,
    path = "/api/reports/teams/{teamId}/players",
    tag = "reports",
    params(("teamId" = String, Path, description = "Identifier of the team")),
    responses(
        (status = 200, description = "PDF document", content_type = "application/pdf", body = Vec<u8>),
        (status = 404, description = "Unknown team", body = ErrorResponse),
        (status = 500, description = "Storage or rendering failure", body = ErrorResponse)
    )
)]
pub async fn players_report(
    State(state): State<SharedState>,
    ApiPath(team_id): ApiPath<String>,
) -> Result<Response, AppError> {
    let file = report_service::players_report(&state, team_id).await?;
    Ok(attachment(file))
}

/// Scheduled matches, newest first.
#[utoipa::path(
    get,
    path = "/api/reports/matches/history",
    tag = "reports",
    responses(
        (status = 200, description = "PDF document", content_type = "application/pdf", body = Vec<u8>),
        (status = 500, description = "Storage or rendering failure", body = ErrorResponse)
    )
)]
pub async fn match_history_report(State(state): State<SharedState>) -> Result<Response, AppError> {
    let file = report_service::match_history_report(&state).await?;
    Ok(attachment(file))
}

/// Both rosters of one match.
#[utoipa::path(
    get,
    path = "/api/reports/matches/{matchId}/roster",
    tag = "reports",
    params(("matchId" = i64, Path, description = "Identifier of the match")),
    responses(
        (status = 200, description = "PDF document", content_type = "application/pdf", body = Vec<u8>),
        (status = 404, description = "Unknown match", body = ErrorResponse),
        (status = 500, description = "Storage or rendering failure", body = ErrorResponse)
    )
)]
pub async fn match_roster_report(
    State(state): State<SharedState>,
    ApiPath(match_id): ApiPath<i64>,
) -> Result<Response, AppError> {
    let file = report_service::match_roster_report(&state, match_id).await?;
    Ok(attachment(file))
}

/// Statistics sheet of one player.
#[utoipa::path(
    get,
    path = "/api/reports/players/{playerId}/stats",
    tag = "reports",
    params(("playerId" = String, Path, description = "Identifier of the player")),
    responses(
        (status = 200, description = "PDF document", content_type = "application/pdf", body = Vec<u8>),
        (status = 404, description = "Unknown player", body = ErrorResponse),
        (status = 500, description = "Storage or rendering failure", body = ErrorResponse)
    )
)]
pub async fn player_stats_report(
    State(state): State<SharedState>,
    ApiPath(player_id): ApiPath<String>,
) -> Result<Response, AppError> {
    let file = report_service::player_stats_report(&state, player_id).await?;
    Ok(attachment(file))
}
