//! Tag boundary resolution.

use crate::error::{LinkerError, LinkerResult};
use crate::git_history::TagRef;
use std::fmt;

/// Commit timestamp used as the lower bound for history scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagBoundary(String);

impl TagBoundary {
    pub fn new(timestamp: impl AsRef<str>) -> Self {
        Self(timestamp.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Find the boundary for `tag` in a newest-first tag list.
///
/// The boundary is the commit date of the tag right before `tag` in
/// chronological order, i.e. the next entry of the list. The oldest tag has
/// no such predecessor and yields [`LinkerError::NoPriorTag`].
pub fn resolve_boundary(tags: &[TagRef], tag: &str) -> LinkerResult<TagBoundary> {
    let index = tags
        .iter()
        .position(|t| t.name == tag)
        .ok_or_else(|| LinkerError::TagNotFound {
            tag: tag.to_string(),
            known: tags.iter().map(|t| t.name.clone()).collect(),
        })?;

    let previous = tags.get(index + 1).ok_or_else(|| LinkerError::NoPriorTag {
        tag: tag.to_string(),
    })?;

    let committed_at = previous
        .committed_at
        .as_deref()
        .map(str::trim)
        .filter(|date| !date.is_empty())
        .ok_or_else(|| LinkerError::TagWithoutDate {
            tag: previous.name.clone(),
        })?;

    tracing::debug!(
        "Boundary for {} is {} ({})",
        tag,
        committed_at,
        previous.name
    );

    Ok(TagBoundary::new(committed_at))
}
