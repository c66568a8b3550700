//! Error types for the API client.
//!
//! # Design
//! `NotFound` gets its own variant because callers routinely branch on
//! "that record is gone" (a stale cache) versus any other failure. Other
//! unexpected statuses land in `Http` with the raw status and body.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server returned 404. Carries the server's message, e.g.
    /// "Post 7 not found".
    #[error("{0}")]
    NotFound(String),

    /// The server returned a status other than the expected one or 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("transport failed: {0}")]
    Transport(String),
}
