//! Git output parsing for tag listings and commit subjects.

use super::GitError;

/// `for-each-ref` format for tag listings: name, committer date of the ref
/// itself (lightweight tags) and of the peeled commit (annotated tags),
/// tab separated.
///
/// `refname:short` turns into `tags/<name>` when a branch shares the tag's
/// name, so the name is taken by stripping `refs/tags/` instead.
pub const TAG_FORMAT: &str = concat!(
    "%(refname:lstrip=2)",
    "%09",
    "%(committerdate:iso)",
    "%09",
    "%(*committerdate:iso)"
);

/// Sort key handing tags back newest first.
pub const TAG_SORT: &str = "--sort=-creatordate";

/// `git log` format producing one subject per line.
pub const SUBJECT_FORMAT: &str = "%s";

/// A tag together with the committer date of the commit it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    /// ISO committer date; `None` when the tag does not point at a commit.
    pub committed_at: Option<String>,
}

impl TagRef {
    pub fn new(name: impl Into<String>, committed_at: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            committed_at: Some(committed_at.into()),
        }
    }
}

/// Parse `for-each-ref` output produced with [`TAG_FORMAT`].
///
/// Line order is kept, so the result is newest first when the listing was
/// sorted with [`TAG_SORT`].
pub fn parse_tag_listing(output: &str) -> Result<Vec<TagRef>, GitError> {
    let mut tags = Vec::new();

    for line in output.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split('\t');
        let (Some(name), Some(direct), Some(peeled)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(GitError::MalformedTagLine(line.to_string()));
        };
        if name.is_empty() {
            return Err(GitError::MalformedTagLine(line.to_string()));
        }

        let committed_at = [peeled.trim(), direct.trim()]
            .into_iter()
            .find(|date| !date.is_empty())
            .map(String::from);

        tags.push(TagRef {
            name: name.to_string(),
            committed_at,
        });
    }

    Ok(tags)
}

/// Split `git log` subject output into lines, dropping blank artifacts.
pub fn parse_subject_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty())
        .map(String::from)
        .collect()
}
