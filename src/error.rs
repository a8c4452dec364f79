use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::{dao::storage::StorageError, dto::common::ErrorResponse};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The storage backend rejected or failed the operation.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Requested resource was not found.
    #[error("{0}")]
    NotFound(String),
    /// A report could not be rendered.
    #[error("report rendering failed: {0}")]
    Render(String),
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Requested resource not found.
    #[error("{0}")]
    NotFound(String),
    /// Anything else, constraint violations included.
    #[error("{0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(message) => AppError::NotFound(message),
            ServiceError::Storage(source) => AppError::Internal(source.to_string()),
            ServiceError::Render(message) => {
                AppError::Internal(format!("report rendering failed: {message}"))
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Internal(format!("invalid request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            // An identifier that does not parse was never issued.
            PathRejection::FailedToDeserializePathParams(err) => {
                AppError::NotFound(format!("no resource at this path: {}", err.body_text()))
            }
            other => AppError::Internal(other.body_text()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::NotFound(message) => {
                warn!(%message, "resource not found");
                StatusCode::NOT_FOUND
            }
            AppError::Internal(message) => {
                error!(%message, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let payload = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, payload).into_response()
    }
}
