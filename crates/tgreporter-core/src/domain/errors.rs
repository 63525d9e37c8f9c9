//! Domain error types
//!
//! Only the two lowest layers produce explicit errors: the secure store
//! ([`StoreError`]) and the delivery transport ([`TransportError`]).
//! Everything above them absorbs these values at the dispatcher boundary.

use thiserror::Error;

/// Placeholder used when an error response body is not valid UTF-8
/// or could not be read at all.
pub const NO_RESPONSE_BODY: &str = "No response body";

/// Errors raised by the secure key-value storage backend
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Reading from or writing to the secure storage failed
    #[error("Identity storage failure: {reason}")]
    IdentityStorageFailure {
        /// Backend-specific description of the failure
        reason: String,
    },
}

impl StoreError {
    /// Creates a [`StoreError::IdentityStorageFailure`] with the given reason
    pub fn storage(reason: impl Into<String>) -> Self {
        StoreError::IdentityStorageFailure {
            reason: reason.into(),
        }
    }
}

/// Errors raised while delivering a rendered message
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The endpoint answered with something that is not a well-formed HTTP response
    #[error("Invalid HTTP response from Telegram API: {0}")]
    InvalidResponse(String),

    /// The endpoint rejected the request with a status outside 200..300
    #[error("Telegram API error (HTTP {status_code}): {body}")]
    ServerError {
        /// HTTP status code returned by the endpoint
        status_code: u16,
        /// UTF-8 decoded response body, or [`NO_RESPONSE_BODY`]
        body: String,
    },

    /// The request never produced a response (connect failure, timeout)
    #[error("Network error: {0}")]
    Network(String),
}

impl TransportError {
    /// Builds a [`TransportError::ServerError`] from a raw response payload.
    ///
    /// Bodies that are not valid UTF-8 are replaced by [`NO_RESPONSE_BODY`].
    pub fn from_status(status_code: u16, body: &[u8]) -> Self {
        let body = std::str::from_utf8(body)
            .map(str::to_string)
            .unwrap_or_else(|_| NO_RESPONSE_BODY.to_string());
        TransportError::ServerError { status_code, body }
    }

    /// Returns the HTTP status code for server errors
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::ServerError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}
