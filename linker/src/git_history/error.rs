//! Error types for git history access.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading tags and commit subjects.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Git is not available on this system")]
    GitNotAvailable,

    #[error("Path is not a git repository: {0}")]
    NotARepository(PathBuf),

    #[error("`git {command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Unexpected tag listing line: {0:?}")]
    MalformedTagLine(String),

    #[error("Failed to run git: {0}")]
    Io(#[from] std::io::Error),

    #[error("Git produced non UTF-8 output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
