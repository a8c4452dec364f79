//! Error types shared by the SQLite storage implementation.

use thiserror::Error;

use crate::dao::models::UnknownGameStatus;

/// Convenient result alias returning [`SqliteDaoError`] failures.
pub type SqliteResult<T> = Result<T, SqliteDaoError>;

/// Failures that can occur while interacting with SQLite.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum SqliteDaoError {
    /// The connection URL could not be parsed.
    #[error("invalid SQLite connection URL `{url}`")]
    InvalidUrl {
        url: String,
        #[source]
        source: sqlx::Error,
    },
    /// Opening the pool failed.
    #[error("failed to connect to SQLite database `{url}`")]
    Connect {
        url: String,
        #[source]
        source: sqlx::Error,
    },
    /// Creating the tables failed.
    #[error("failed to apply schema statement #{index}")]
    Schema {
        index: usize,
        #[source]
        source: sqlx::Error,
    },
    /// The health check query failed.
    #[error("SQLite health check failed")]
    HealthCheck {
        #[source]
        source: sqlx::Error,
    },
    /// Reading the team listing failed.
    #[error("failed to list teams")]
    ListTeams {
        #[source]
        source: sqlx::Error,
    },
    /// Reading one team failed.
    #[error("failed to load team `{id}`")]
    LoadTeam {
        id: String,
        #[source]
        source: sqlx::Error,
    },
    /// Inserting a team failed.
    #[error("failed to create team `{id}`")]
    CreateTeam {
        id: String,
        #[source]
        source: sqlx::Error,
    },
    /// Deleting a team or its players failed.
    #[error("failed to delete team `{id}`")]
    DeleteTeam {
        id: String,
        #[source]
        source: sqlx::Error,
    },
    /// The team is still referenced by a scheduled match; nothing was deleted.
    #[error("team `{id}` is scheduled in {matches} match(es)")]
    TeamScheduled { id: String, matches: i64 },
    /// Inserting a player failed.
    #[error("failed to add player `{id}` to team `{team_id}`")]
    AddPlayer {
        id: String,
        team_id: String,
        #[source]
        source: sqlx::Error,
    },
    /// Deleting a player failed.
    #[error("failed to delete player `{id}`")]
    DeletePlayer {
        id: String,
        #[source]
        source: sqlx::Error,
    },
    /// Reading the player listing failed.
    #[error("failed to list players")]
    ListPlayers {
        #[source]
        source: sqlx::Error,
    },
    /// Reading one player failed.
    #[error("failed to load player `{id}`")]
    LoadPlayer {
        id: String,
        #[source]
        source: sqlx::Error,
    },
    /// Any statement of the game transaction failed; nothing was persisted.
    #[error("failed to save game ({step})")]
    SaveGame {
        step: &'static str,
        #[source]
        source: sqlx::Error,
    },
    /// Stats or settings could not be serialized before the insert.
    #[error("failed to encode `{column}` payload")]
    EncodePayload {
        column: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// Reading the game listing failed.
    #[error("failed to list games")]
    ListGames {
        #[source]
        source: sqlx::Error,
    },
    /// Reading one game or its event logs failed.
    #[error("failed to load game `{id}`")]
    LoadGame {
        id: i64,
        #[source]
        source: sqlx::Error,
    },
    /// Inserting a match failed.
    #[error("failed to create match between `{home}` and `{away}`")]
    CreateMatch {
        home: String,
        away: String,
        #[source]
        source: sqlx::Error,
    },
    /// Reading the match listing failed.
    #[error("failed to list matches")]
    ListMatches {
        #[source]
        source: sqlx::Error,
    },
    /// Reading one match or its rosters failed.
    #[error("failed to load match `{id}`")]
    LoadMatch {
        id: i64,
        #[source]
        source: sqlx::Error,
    },
    /// A stored row holds a value the application cannot represent.
    #[error("corrupt row in `{table}`")]
    CorruptRow {
        table: &'static str,
        #[source]
        source: UnknownGameStatus,
    },
}

impl SqliteDaoError {
    fn sqlx_source(&self) -> Option<&sqlx::Error> {
        match self {
            SqliteDaoError::InvalidUrl { source, .. }
            | SqliteDaoError::Connect { source, .. }
            | SqliteDaoError::Schema { source, .. }
            | SqliteDaoError::HealthCheck { source }
            | SqliteDaoError::ListTeams { source }
            | SqliteDaoError::LoadTeam { source, .. }
            | SqliteDaoError::CreateTeam { source, .. }
            | SqliteDaoError::DeleteTeam { source, .. }
            | SqliteDaoError::AddPlayer { source, .. }
            | SqliteDaoError::DeletePlayer { source, .. }
            | SqliteDaoError::ListPlayers { source }
            | SqliteDaoError::LoadPlayer { source, .. }
            | SqliteDaoError::SaveGame { source, .. }
            | SqliteDaoError::ListGames { source }
            | SqliteDaoError::LoadGame { source, .. }
            | SqliteDaoError::CreateMatch { source, .. }
            | SqliteDaoError::ListMatches { source }
            | SqliteDaoError::LoadMatch { source, .. } => Some(source),
            SqliteDaoError::TeamScheduled { .. }
            | SqliteDaoError::EncodePayload { .. }
            | SqliteDaoError::CorruptRow { .. } => None,
        }
    }

    /// Kind of the database-level violation behind this error, if any.
    pub fn database_error_kind(&self) -> Option<sqlx::error::ErrorKind> {
        match self.sqlx_source()? {
            sqlx::Error::Database(db) => Some(db.kind()),
            _ => None,
        }
    }

    /// True when the database itself could not be reached.
    pub fn is_connection_failure(&self) -> bool {
        match self {
            SqliteDaoError::InvalidUrl { .. } | SqliteDaoError::Connect { .. } => true,
            other => matches!(
                other.sqlx_source(),
                Some(
                    sqlx::Error::Io(_)
                        | sqlx::Error::PoolTimedOut
                        | sqlx::Error::PoolClosed
                        | sqlx::Error::Tls(_)
                )
            ),
        }
    }
}
