//! Error type shared by the whole crate.

use chrono::NaiveDateTime;
use thiserror::Error;

/// HTTP statuses the provider uses for transient, server-side failures.
pub const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Errors returned by the Terna client.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or unusable construction parameters.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The token endpoint answered without a usable bearer token.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The provider answered with a non-2xx status.
    #[error("HTTP {status} from {url}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    /// Connection, timeout or body decoding failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body is not valid JSON.
    #[error("failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// A value of the date column could not be read as a timestamp.
    #[error("column {column:?}: unparseable timestamp {value:?}")]
    Timestamp { column: String, value: String },

    /// The wall-clock time falls in a daylight-saving gap.
    #[error("{0} does not exist in Europe/Rome")]
    NonexistentLocalTime(NaiveDateTime),

    /// Frame assembly failed.
    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),
}

impl Error {
    /// Whether the failure belongs to the server-side, retryable class
    /// (429, 500, 502, 503, 504). The client never retries by itself.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Status { status, .. } => RETRYABLE_STATUSES.contains(status),
            _ => false,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
