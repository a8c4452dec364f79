//! Wire types of the REST API, shared with the HTTP client.

use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Acknowledgement and error payloads.
pub mod common;
/// Recorded games and their event logs.
pub mod game;
/// Health check payload.
pub mod health;
/// Scheduled matches.
pub mod matchup;
/// Teams and their rosters.
pub mod team;

fn format_timestamp(time: OffsetDateTime) -> String {
    time.format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
