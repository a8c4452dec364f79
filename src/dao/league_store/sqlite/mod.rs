mod config;
mod connection;
mod error;
mod models;
mod schema;
/// [`SqliteLeagueStore`] and its queries.
pub mod store;

pub use config::SqliteConfig;
pub use error::SqliteDaoError;
pub use store::SqliteLeagueStore;

use crate::dao::storage::StorageError;

impl From<SqliteDaoError> for StorageError {
    fn from(err: SqliteDaoError) -> Self {
        let message = err.to_string();
        if err.is_connection_failure() {
            return StorageError::connection(message, err);
        }
        if matches!(err, SqliteDaoError::TeamScheduled { .. }) {
            return StorageError::ForeignKeyViolation { message };
        }
        match err.database_error_kind() {
            Some(sqlx::error::ErrorKind::UniqueViolation) => {
                StorageError::ConstraintViolation { message }
            }
            Some(sqlx::error::ErrorKind::ForeignKeyViolation) => {
                StorageError::ForeignKeyViolation { message }
            }
            _ => StorageError::persistence(message, err),
        }
    }
}
