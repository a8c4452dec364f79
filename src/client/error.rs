//! Error types returned by the HTTP client facade.

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`ClientError`] failures.
pub type ClientResult<T> = Result<T, ClientError>;

/// Failures surfaced to front ends calling the REST API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL cannot be used to build endpoint URLs.
    #[error("invalid API base URL `{url}`: {message}")]
    InvalidUrl {
        /// URL as given to the client.
        url: String,
        /// Why it was rejected.
        message: String,
    },
    /// The request could not be sent or no response arrived.
    #[error("failed to send request to `{path}`")]
    Request {
        /// Request path, `/api/...`.
        path: String,
        /// Transport or decoding failure.
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("server answered {status} for `{path}`: {message}")]
    Status {
        /// Request path, `/api/...`.
        path: String,
        /// Status returned by the server.
        status: StatusCode,
        /// The `error` field of the response body, or `"unknown error"`.
        message: String,
    },
    /// The response body did not match the expected shape.
    #[error("failed to decode response from `{path}`")]
    Decode {
        /// Request path, `/api/...`.
        path: String,
        /// Transport or decoding failure.
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    /// HTTP status of a rejected call, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
