//! Error types for the release linker.

use crate::git_history::GitError;
use release_linker_tracker::{IssueKey, TrackerError};
use thiserror::Error;

/// Errors that can stop a linking run, plus the per-item link failure.
#[derive(Debug, Error)]
pub enum LinkerError {
    #[error("Tag {tag} not found in tags: {}", .known.join(", "))]
    TagNotFound { tag: String, known: Vec<String> },

    #[error("Tag {tag} is the oldest tag; there is no earlier tag to link from")]
    NoPriorTag { tag: String },

    #[error("Tag {tag} does not point at a commit and has no commit date")]
    TagWithoutDate { tag: String },

    #[error("Invalid release ticket reference: {0:?}")]
    InvalidTicketReference(String),

    #[error("Failed to fetch linked issues: {0}")]
    RemoteFetch(#[source] TrackerError),

    #[error("Error creating link for {key}: {source}")]
    LinkCreation {
        key: IssueKey,
        #[source]
        source: TrackerError,
    },

    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Link queue error: {0}")]
    Queue(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for linker operations.
pub type LinkerResult<T> = Result<T, LinkerError>;
