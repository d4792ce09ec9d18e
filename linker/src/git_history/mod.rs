//! Git history access for release linking.
//!
//! This module provides functionality to:
//! - List repository tags newest first, with their commit dates
//! - Read commit subjects made since a tag boundary

mod error;
mod executor;
mod parser;

pub use error::GitError;
pub use executor::GitExecutor;
pub use parser::{parse_subject_lines, parse_tag_listing, TagRef};

use crate::tags::TagBoundary;

/// Version-control operations the linking pipeline depends on.
pub trait CommitHistory {
    /// All tags, newest first.
    fn list_tags(&self) -> Result<Vec<TagRef>, GitError>;

    /// Commit subject lines committed after `since`, blank lines removed.
    fn subjects_since(&self, since: &TagBoundary) -> Result<Vec<String>, GitError>;
}
