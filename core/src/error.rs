//! Error types for the tracker API client.
//!
//! # Design
//! Only two things can make an operation fail: the transport itself, or a
//! response body that is not the expected JSON. HTTP error statuses are NOT
//! part of this taxonomy — a 4xx/5xx response surfaces as a resolved result
//! and status interpretation is left to the caller (see `update_ticket`,
//! which exposes the raw response for exactly that reason).

use std::fmt;

/// Errors returned by `TrackerClient` operations.
#[derive(Debug)]
pub enum Error {
    /// The network call itself failed (DNS, connect, reset, body read).
    Transport(reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    Decode(serde_json::Error),

    /// The request payload could not be serialized to JSON.
    Serialize(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(err) => write!(f, "transport failed: {err}"),
            Error::Decode(err) => write!(f, "response body is not valid JSON: {err}"),
            Error::Serialize(err) => write!(f, "request payload failed to serialize: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Transport(err) => Some(err),
            Error::Decode(err) | Error::Serialize(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err)
    }
}
