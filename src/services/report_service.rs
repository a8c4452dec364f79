//! PDF report generation. Every document is rendered completely before the
//! response starts so failures still reach the caller as JSON errors.

use time::OffsetDateTime;
use tracing::{debug, error};

use crate::{
    error::ServiceError,
    report::{Report, layouts, pdf, sanitize_filename},
    state::SharedState,
};

/// Rendered report ready to be sent as an attachment.
#[derive(Debug, Clone)]
pub struct ReportFile {
    /// Sanitized download name.
    pub filename: String,
    /// PDF document.
    pub bytes: Vec<u8>,
}

/// Every registered team, ordered by name.
pub async fn teams_report(state: &SharedState) -> Result<ReportFile, ServiceError> {
    let teams = state.store().list_teams().await?;
    let report = layouts::teams_report(&teams, OffsetDateTime::now_utc());
    render("teams_report.pdf".to_owned(), report).await
}

/// Roster of one team.
pub async fn players_report(
    state: &SharedState,
    team_id: String,
) -> Result<ReportFile, ServiceError> {
    let Some(team) = state.store().find_team(team_id.clone()).await? else {
        return Err(ServiceError::NotFound(format!("team `{team_id}` not found")));
    };
    let report = layouts::players_report(&team, OffsetDateTime::now_utc());
    render(format!("players_{}.pdf", team.name), report).await
}

/// Every scheduled match, newest first.
pub async fn match_history_report(state: &SharedState) -> Result<ReportFile, ServiceError> {
    let matches = state.store().list_matches().await?;
    let report = layouts::match_history_report(&matches, OffsetDateTime::now_utc());
    render("match_history.pdf".to_owned(), report).await
}

/// Home and away rosters of one match.
pub async fn match_roster_report(
    state: &SharedState,
    match_id: i64,
) -> Result<ReportFile, ServiceError> {
    let Some(roster) = state.store().find_match_roster(match_id).await? else {
        return Err(ServiceError::NotFound(format!(
            "match `{match_id}` not found"
        )));
    };
    let report = layouts::match_roster_report(&roster, OffsetDateTime::now_utc());
    render(format!("match_{match_id}_roster.pdf"), report).await
}

/// Statistics sheet of one player.
pub async fn player_stats_report(
    state: &SharedState,
    player_id: String,
) -> Result<ReportFile, ServiceError> {
    let Some(profile) = state.store().find_player(player_id.clone()).await? else {
        return Err(ServiceError::NotFound(format!(
            "player `{player_id}` not found"
        )));
    };
    let report = layouts::player_stats_report(&profile, OffsetDateTime::now_utc());
    render(
        format!("player_stats_{}.pdf", profile.player.name),
        report,
    )
    .await
}

async fn render(filename: String, report: Report) -> Result<ReportFile, ServiceError> {
    let filename = sanitize_filename(&filename);
    let bytes = tokio::task::spawn_blocking(move || pdf::render(&report))
        .await
        .map_err(|err| {
            error!(error = %err, "report rendering task failed");
            ServiceError::Render(err.to_string())
        })?
        .map_err(|err| ServiceError::Render(err.to_string()))?;

    debug!(%filename, size = bytes.len(), "report rendered");
    Ok(ReportFile { filename, bytes })
}
