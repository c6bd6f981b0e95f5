//! Error types for the Instant client.

use thiserror::Error;

/// Errors that can occur while talking to the Instant API.
///
/// Non-2xx responses are classified by status code into the first six
/// variants; the remaining variants cover transport and decoding failures.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP 401: missing, invalid, or revoked credentials.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// HTTP 400: malformed email, GUID, client name, or configuration.
    #[error("invalid request: {0}")]
    Request(String),

    /// HTTP 404: well-formed but unknown or expired email GUID.
    #[error("not found: {0}")]
    NotFound(String),

    /// HTTP 500.
    #[error("service error: {0}")]
    Service(String),

    /// HTTP 504: capture did not finish in time.
    #[error("capture timed out: {0}")]
    Timeout(String),

    /// Any other non-2xx status.
    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Transport failure before a response was received.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A successful response whose body did not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured base URL could not be parsed.
    #[error("invalid base URL: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Classify an HTTP status into an error.
    ///
    /// Returns `None` for 2xx statuses.
    pub fn from_status(status: u16, message: impl Into<String>) -> Option<Self> {
        if (200..300).contains(&status) {
            return None;
        }

        Some(Self::classify(status, message.into()))
    }

    /// Map a non-2xx status onto the error taxonomy.
    pub(crate) fn classify(status: u16, message: String) -> Self {
        match status {
            401 => Error::Authentication(message),
            400 => Error::Request(message),
            404 => Error::NotFound(message),
            500 => Error::Service(message),
            504 => Error::Timeout(message),
            status => Error::Api { status, message },
        }
    }

    /// The HTTP status this error was classified from, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Authentication(_) => Some(401),
            Error::Request(_) => Some(400),
            Error::NotFound(_) => Some(404),
            Error::Service(_) => Some(500),
            Error::Timeout(_) => Some(504),
            Error::Api { status, .. } => Some(*status),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            Error::Json(_) | Error::Url(_) => None,
        }
    }

    /// The server-supplied description for classified API errors.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Authentication(m)
            | Error::Request(m)
            | Error::NotFound(m)
            | Error::Service(m)
            | Error::Timeout(m)
            | Error::Api { message: m, .. } => Some(m),
            _ => None,
        }
    }
}

/// Pull the `description` field out of an error body.
///
/// Bodies that are not JSON objects, or lack the field, yield an empty string.
pub(crate) fn description(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("description")?.as_str().map(str::to_owned))
        .unwrap_or_default()
}
