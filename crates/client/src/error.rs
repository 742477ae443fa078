//! Client errors.

use thiserror::Error;

/// Failures surfaced by [`crate::NorthwindClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the request payload or identity (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The addressed record does not exist (404).
    #[error("not found")]
    NotFound,

    /// The record changed since it was read (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The server failed to complete the request (5xx).
    #[error("server error {status}: {body}")]
    Server { status: u16, body: String },

    /// Any other non-success status.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// Transport or decoding failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    pub(crate) fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        use reqwest::StatusCode;

        match status {
            StatusCode::BAD_REQUEST => Self::BadRequest(body),
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::CONFLICT => Self::Conflict(body),
            status if status.is_server_error() => Self::Server {
                status: status.as_u16(),
                body,
            },
            status => Self::UnexpectedStatus {
                status: status.as_u16(),
                body,
            },
        }
    }
}
