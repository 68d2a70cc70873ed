//! Error handling types for the Daypia client.

use thiserror::Error;

/// Errors surfaced by [`crate::DaypiaClient`].
///
/// Every failed remote call, whatever went wrong underneath (connection
/// error, non-2xx status, malformed response body), is normalized into
/// [`DaypiaError::Api`] at the execution boundary. Callers own any retry
/// policy; a failed call gives no guarantee about whether the remote side
/// partially applied the operation.
#[derive(Debug, Error)]
pub enum DaypiaError {
    /// A remote call failed. `code` is the HTTP status for rejected
    /// responses, or a short kind tag (`transport`, `decode`) otherwise.
    #[error("Daypia call failed: {code} - {message}")]
    Api { code: String, message: String },

    /// The client could not be constructed from the given configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl DaypiaError {
    pub fn api(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Internal failure classification.
///
/// Kept distinguishable for unit tests; normalized into
/// [`DaypiaError::Api`] (and logged exactly once) before leaving the crate.
#[derive(Debug)]
pub(crate) enum Failure {
    /// Connection, DNS or timeout failure before a usable response existed,
    /// including failures while reading the response body.
    Transport(String),
    /// A response arrived but its status was outside the 2xx class.
    Status { status: u16, body: String },
    /// A successful response could not be parsed into the expected shape.
    Decode(String),
}

impl Failure {
    pub(crate) fn code(&self) -> String {
        match self {
            Self::Transport(_) => "transport".to_string(),
            Self::Status { status, .. } => status.to_string(),
            Self::Decode(_) => "decode".to_string(),
        }
    }

    pub(crate) fn message(&self) -> &str {
        match self {
            Self::Transport(message) | Self::Decode(message) => message,
            Self::Status { body, .. } => body,
        }
    }
}

impl From<reqwest::Error> for Failure {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for Failure {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
