//! Backend-agnostic storage errors.

use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The database could not be reached or the handshake failed.
    #[error("storage connection failed: {message}")]
    Connection {
        /// What was being attempted.
        message: String,
        /// Backend failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// A unique key already exists.
    #[error("constraint violation: {message}")]
    ConstraintViolation {
        /// Backend description of the violation.
        message: String,
    },
    /// A referenced row does not exist (or still has dependents).
    #[error("foreign key violation: {message}")]
    ForeignKeyViolation {
        /// Backend description of the violation.
        message: String,
    },
    /// Any other read or write failure.
    #[error("persistence failure: {message}")]
    Persistence {
        /// What was being attempted.
        message: String,
        /// Backend failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Construct a connection error from any backend failure.
    pub fn connection(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Connection {
            message,
            source: Box::new(source),
        }
    }

    /// Construct a generic persistence error from any backend failure.
    pub fn persistence(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Persistence {
            message,
            source: Box::new(source),
        }
    }
}
