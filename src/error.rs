//! Error types shared by all provider adapters.
//!
//! Four kinds of failure exist, and callers frequently want to tell them
//! apart: a bad resource name caught before any network call, a non-2xx
//! transport result, an error object reported inside an otherwise successful
//! response body, and a body that is not valid JSON at all. Connection-level
//! failures from reqwest get their own variant so they are not mistaken for
//! HTTP status errors.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the adapter clients.
#[derive(Debug, Error)]
pub enum Error {
    /// A resource name outside the allow-list was used while building a
    /// request path. Raised before any request is sent.
    #[error("unknown resource: {0}")]
    UnknownResource(String),

    /// A verb was invoked with no accumulated request path.
    #[error("no resource path selected")]
    NoResource,

    /// The request could not be sent or the response not read.
    #[error("request failed: {0}")]
    Connection(#[from] reqwest::Error),

    /// Local I/O failure (config file, runtime construction).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server answered with a non-2xx status.
    #[error("API request failed: {status} {reason}")]
    Transport { status: u16, reason: String },

    /// The response decoded cleanly but carried a provider error object.
    #[error("API error ({kind}): {message}")]
    Api { kind: String, message: String },

    /// The response body was not valid JSON. Carries the raw body so the
    /// offending payload shows up in logs and bug reports.
    #[error("invalid JSON in API response: {body}")]
    Decode {
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// True for errors raised during chain building, before any I/O.
    pub fn is_structural(&self) -> bool {
        matches!(self, Error::UnknownResource(_) | Error::NoResource)
    }
}
