//! Error types for the supplier API client.
//!
//! # Design
//! Validation failures (`InvalidArgument`, `UnknownEndpoint`) are raised
//! before any request leaves the process. `Unauthorized` gets a dedicated
//! variant because a bad or expired token is the one failure callers act on;
//! every other non-2xx response lands in `HttpError` with the raw status and
//! body.

use thiserror::Error;

/// Leading text of every `InvalidArgument` Display.
pub(crate) const INVALID_ARGUMENT_PREFIX: &str = "invalid argument: ";

/// Errors returned by request building, configuration and fetching.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A filter had the wrong type, an unknown name, or a value outside its
    /// allowed set.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The endpoint key is not in the endpoint table.
    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// A required configuration variable is missing or blank.
    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),

    /// The HTTP round-trip itself failed (connection, DNS, I/O).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned 401.
    #[error("unauthorized: the API rejected the token")]
    Unauthorized,

    /// The server returned a non-2xx status other than 401.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be decoded as JSON (or as the requested
    /// type).
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl ApiError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
