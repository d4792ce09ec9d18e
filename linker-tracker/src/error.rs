//! Error types for release-linker-tracker

use thiserror::Error;

/// Errors that can occur while talking to the issue tracker
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The tracker answered with a non-success status
    #[error("Request failed ({status} {name}): {message}")]
    Request {
        status: u16,
        name: String,
        message: String,
    },

    /// Connection, TLS or timeout failure before a response arrived
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// String is not a `PROJECTKEY-NUMBER` issue key
    #[error("Invalid issue key: {0:?}")]
    InvalidIssueKey(String),

    /// Client could not be configured
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TrackerError {
    /// Create a request error
    pub fn request(status: u16, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Request {
            status,
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create an invalid issue key error
    pub fn invalid_key(raw: impl Into<String>) -> Self {
        Self::InvalidIssueKey(raw.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status code, when the tracker produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Short name of the failure class, used in diagnostics
    pub fn name(&self) -> &str {
        match self {
            Self::Request { name, .. } => name,
            Self::Transport(err) if err.is_timeout() => "Timeout",
            Self::Transport(err) if err.is_connect() => "ConnectError",
            Self::Transport(_) => "TransportError",
            Self::InvalidResponse(_) => "InvalidResponse",
            Self::InvalidIssueKey(_) => "InvalidIssueKey",
            Self::Config(_) => "ConfigError",
        }
    }
}

/// Result type for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
