//! Fixed layouts of the five league reports.
//!
//! Data the league does not record yet (match scores, per-player statistics, player
//! bio fields) is printed as [`NOT_AVAILABLE`] rather than invented.

use time::{OffsetDateTime, UtcOffset, macros::format_description};

use crate::{
    dao::models::{MatchEntity, MatchRosterEntity, PlayerEntity, PlayerProfileEntity, TeamEntity},
    report::{Block, Column, Report, Table},
};

/// Placeholder for values the league does not track.
pub const NOT_AVAILABLE: &str = "N/A";

/// Registered teams ordered by name.
pub fn teams_report(teams: &[TeamEntity], now: OffsetDateTime) -> Report {
    let mut sorted: Vec<&TeamEntity> = teams.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

    let mut table = Table::new(
        vec![
            Column::new("Name", 200.0),
            Column::new("City", 150.0),
            Column::new("Logo", 145.0),
        ],
        "No teams registered.",
    )
    .with_summary("Total teams");
    for team in sorted {
        table.row(vec![
            team.name.clone(),
            or_placeholder(team.city.as_deref()),
            if team.logo.as_deref().is_some_and(|logo| !logo.is_empty()) {
                "Yes".to_owned()
            } else {
                "No".to_owned()
            },
        ]);
    }

    Report::new("REGISTERED TEAMS REPORT", date_line(now)).block(Block::Table(table))
}

/// One team's roster ordered by jersey number.
pub fn players_report(team: &TeamEntity, now: OffsetDateTime) -> Report {
    let mut table = Table::new(
        vec![
            Column::new("#", 40.0),
            Column::new("Full name", 155.0),
            Column::new("Position", 80.0),
            Column::new("Age", 50.0),
            Column::new("Height", 70.0),
            Column::new("Nationality", 100.0),
        ],
        "This team has no registered players.",
    )
    .with_summary("Total players");
    for player in &team.players {
        table.row(vec![
            player.number.clone(),
            player.name.clone(),
            NOT_AVAILABLE.to_owned(),
            NOT_AVAILABLE.to_owned(),
            NOT_AVAILABLE.to_owned(),
            NOT_AVAILABLE.to_owned(),
        ]);
    }

    Report::new("PLAYERS REPORT", date_line(now))
        .subtitle(format!("Team: {}", team.name))
        .subtitle(format!("City: {}", or_placeholder(team.city.as_deref())))
        .block(Block::Table(table))
}

/// Scheduled matches, newest first as returned by the store.
pub fn match_history_report(matches: &[MatchEntity], now: OffsetDateTime) -> Report {
    let mut table = Table::new(
        vec![
            Column::new("Date/Time", 120.0),
            Column::new("Home team", 140.0),
            Column::new("Away team", 140.0),
            Column::new("Score", 95.0),
        ],
        "No matches registered.",
    )
    .with_summary("Total matches");
    for matchup in matches {
        table.row(vec![
            format_date_time(matchup.date_time),
            matchup.home_team.name.clone(),
            matchup.away_team.name.clone(),
            format!("{NOT_AVAILABLE} - {NOT_AVAILABLE}"),
        ]);
    }

    Report::new("MATCH HISTORY", date_line(now)).block(Block::Table(table))
}

/// Both rosters of a scheduled match.
pub fn match_roster_report(roster: &MatchRosterEntity, now: OffsetDateTime) -> Report {
    let matchup = &roster.matchup;
    Report::new("MATCH ROSTER", date_line(now))
        .subtitle(format!(
            "{} vs {}",
            matchup.home_team.name, matchup.away_team.name
        ))
        .subtitle(format!("Match date: {}", format_date_time(matchup.date_time)))
        .block(Block::Heading(format!(
            "Home team: {}",
            matchup.home_team.name
        )))
        .block(Block::Table(roster_table(&roster.home_players)))
        .block(Block::Heading(format!(
            "Away team: {}",
            matchup.away_team.name
        )))
        .block(Block::Table(roster_table(&roster.away_players)))
}

/// Statistics sheet of a single player.
pub fn player_stats_report(profile: &PlayerProfileEntity, now: OffsetDateTime) -> Report {
    let fields = [
        "Total points",
        "Assists",
        "Rebounds",
        "Fouls committed",
        "Games played",
    ]
    .into_iter()
    .map(|label| (label.to_owned(), NOT_AVAILABLE.to_owned()))
    .collect();

    Report::new("PLAYER STATISTICS", date_line(now))
        .subtitle(format!(
            "{} (#{})",
            profile.player.name, profile.player.number
        ))
        .subtitle(format!("Team: {}", profile.team_name))
        .block(Block::Text("Statistics summary:".to_owned()))
        .block(Block::Fields(fields))
        .block(Block::Notice(
            "Per-player statistics are not recorded by the league yet.".to_owned(),
        ))
}

fn roster_table(players: &[PlayerEntity]) -> Table {
    let mut table = Table::new(
        vec![Column::new("#", 40.0), Column::new("Name", 455.0)],
        "No registered players.",
    );
    for player in players {
        table.row(vec![player.number.clone(), player.name.clone()]);
    }
    table
}

fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value.to_owned(),
        _ => NOT_AVAILABLE.to_owned(),
    }
}

fn date_line(now: OffsetDateTime) -> String {
    let date = now
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| NOT_AVAILABLE.to_owned());
    format!("Date: {date}")
}

fn format_date_time(value: OffsetDateTime) -> String {
    value
        .to_offset(UtcOffset::UTC)
        .format(format_description!("[year]-[month]-[day] [hour]:[minute] UTC"))
        .unwrap_or_else(|_| NOT_AVAILABLE.to_owned())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::dao::models::TeamRefEntity;

    fn team(id: &str, name: &str, city: Option<&str>) -> TeamEntity {
        TeamEntity {
            id: id.into(),
            name: name.into(),
            logo: None,
            city: city.map(Into::into),
            created_at: datetime!(2025-01-01 00:00 UTC),
            players: Vec::new(),
        }
    }

    fn only_table(report: &Report) -> &Table {
        report
            .blocks
            .iter()
            .find_map(|block| match block {
                Block::Table(table) => Some(table),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn teams_are_sorted_by_name_with_placeholders() {
        let mut lakers = team("2", "Lakers", None);
        lakers.logo = Some("https://logo".into());
        let teams = vec![lakers, team("1", "Celtics", Some("Boston"))];

        let report = teams_report(&teams, datetime!(2025-05-04 10:00 UTC));
        let table = only_table(&report);

        assert_eq!(report.generated_on, "Date: 2025-05-04");
        assert_eq!(table.rows[0], vec!["Celtics", "Boston", "No"]);
        assert_eq!(table.rows[1], vec!["Lakers", NOT_AVAILABLE, "Yes"]);
    }

    #[test]
    fn history_scores_are_placeholders() {
        let matches = vec![MatchEntity {
            id: 1,
            home_team: TeamRefEntity {
                id: "h".into(),
                name: "Home".into(),
            },
            away_team: TeamRefEntity {
                id: "a".into(),
                name: "Away".into(),
            },
            date_time: datetime!(2025-03-01 18:30 UTC),
        }];

        let report = match_history_report(&matches, datetime!(2025-05-04 10:00 UTC));
        let table = only_table(&report);
        assert_eq!(
            table.rows[0],
            vec!["2025-03-01 18:30 UTC", "Home", "Away", "N/A - N/A"]
        );
    }

    #[test]
    fn empty_roster_keeps_its_no_data_message() {
        let report = players_report(
            &team("1", "Celtics", None),
            datetime!(2025-05-04 10:00 UTC),
        );
        let table = only_table(&report);

        assert!(table.rows.is_empty());
        assert_eq!(table.empty_message, "This team has no registered players.");
        assert_eq!(report.subtitles[1], "City: N/A");
    }

    #[test]
    fn player_sheet_never_fabricates_numbers() {
        let profile = PlayerProfileEntity {
            player: PlayerEntity {
                id: "p1".into(),
                team_id: "t1".into(),
                name: "Ana".into(),
                number: "7".into(),
            },
            team_name: "Celtics".into(),
        };

        let report = player_stats_report(&profile, datetime!(2025-05-04 10:00 UTC));
        assert_eq!(report.subtitles[0], "Ana (#7)");
        let fields = report
            .blocks
            .iter()
            .find_map(|block| match block {
                Block::Fields(fields) => Some(fields),
                _ => None,
            })
            .unwrap();
        assert!(fields.iter().all(|(_, value)| value == NOT_AVAILABLE));
    }
}
