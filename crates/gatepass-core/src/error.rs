//! Unified error handling for gatepass-core

use reqwest::StatusCode;
use thiserror::Error;

/// Core error type for gatepass-core
///
/// Every auth operation surfaces one of these; nothing is swallowed. The
/// HTTP-status variants carry the message the remote service reported where
/// the status class makes it useful, and a fixed human-readable message
/// otherwise.
#[derive(Error, Debug)]
pub enum Error {
    /// Pre-hashing could not run. The plaintext password is never sent instead.
    #[error("Password hashing failed: {0}")]
    CryptoFailure(String),

    /// Transport-level failure (DNS, connect, timeout), as opposed to an
    /// HTTP error status reported by the service.
    #[error("Network connection failed, please check your connection ({0})")]
    NetworkFailure(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// The service rejected our token; local session state has already been
    /// cleared by the time this surfaces.
    #[error("Session expired, please sign in again")]
    SessionExpired,

    #[error("Permission denied")]
    Forbidden,

    #[error("The requested resource does not exist")]
    NotFound,

    #[error("Internal server error")]
    ServerError,

    #[error("Bad gateway")]
    BadGateway,

    #[error("Service temporarily unavailable")]
    Unavailable,

    #[error("{0}")]
    UnknownError(String),

    /// Provider redirect or authorization-code exchange problem.
    #[error("OAuth authorization failed: {0}")]
    OAuthFailure(String),
}

/// Result type alias for gatepass-core
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Classify a transport error from the HTTP client
    pub fn network(err: reqwest::Error) -> Self {
        Error::NetworkFailure(err.to_string())
    }

    /// Create an OAuth failure
    pub fn oauth(msg: impl Into<String>) -> Self {
        Error::OAuthFailure(msg.into())
    }

    /// Map a non-success HTTP status to the taxonomy.
    ///
    /// `message` is whatever `message`/`error` field the response body
    /// carried; a non-JSON body leaves it `None` and the status-derived
    /// message stands.
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        match status.as_u16() {
            400 => Error::BadRequest(
                message.unwrap_or_else(|| "invalid request parameters".to_string()),
            ),
            401 => Error::SessionExpired,
            403 => Error::Forbidden,
            404 => Error::NotFound,
            500 => Error::ServerError,
            502 => Error::BadGateway,
            503 => Error::Unavailable,
            _ => Error::UnknownError(
                message.unwrap_or_else(|| format!("request failed with status {}", status)),
            ),
        }
    }
}

// Convert to String for embedders that only want the display text
impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
