//! Git command execution wrapper.

use super::parser::{self, TagRef, SUBJECT_FORMAT, TAG_FORMAT, TAG_SORT};
use super::{CommitHistory, GitError};
use crate::tags::TagBoundary;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs git inside one repository.
pub struct GitExecutor {
    repo_path: PathBuf,
}

impl GitExecutor {
    /// Create a new git executor for the given repository path.
    pub fn new(repo_path: &Path) -> Result<Self, GitError> {
        // Verify git is available
        let output = Command::new("git")
            .arg("--version")
            .output()
            .map_err(|_| GitError::GitNotAvailable)?;

        if !output.status.success() {
            return Err(GitError::GitNotAvailable);
        }

        // Verify path is a git repository
        let output = Command::new("git")
            .current_dir(repo_path)
            .args(["rev-parse", "--git-dir"])
            .output()?;

        if !output.status.success() {
            return Err(GitError::NotARepository(repo_path.to_path_buf()));
        }

        Ok(Self {
            repo_path: repo_path.to_path_buf(),
        })
    }

    /// Run `git <args>` in the repository and return its stdout.
    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        tracing::debug!("git {}", args.join(" "));

        let output = Command::new("git")
            .current_dir(&self.repo_path)
            .args(args)
            .output()?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: args.join(" "),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}

impl CommitHistory for GitExecutor {
    fn list_tags(&self) -> Result<Vec<TagRef>, GitError> {
        let format = format!("--format={}", TAG_FORMAT);
        let output = self.run(&["for-each-ref", TAG_SORT, &format, "refs/tags"])?;
        parser::parse_tag_listing(&output)
    }

    fn subjects_since(&self, since: &TagBoundary) -> Result<Vec<String>, GitError> {
        let format = format!("--format={}", SUBJECT_FORMAT);
        let since = format!("--since={}", since.as_str());
        let output = self.run(&["log", &format, &since])?;
        Ok(parser::parse_subject_lines(&output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git(dir: &Path, args: &[&str], date: &str) -> bool {
        Command::new("git")
            .current_dir(dir)
            .args(args)
            .env("GIT_AUTHOR_DATE", date)
            .env("GIT_COMMITTER_DATE", date)
            .env("GIT_AUTHOR_NAME", "Release Bot")
            .env("GIT_AUTHOR_EMAIL", "bot@example.com")
            .env("GIT_COMMITTER_NAME", "Release Bot")
            .env("GIT_COMMITTER_EMAIL", "bot@example.com")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Build a small repository, or `None` when git is not usable here.
    fn scratch_repo() -> Option<TempDir> {
        let dir = TempDir::new().unwrap();
        let path = dir.path();
        let date = "2024-01-01T10:00:00+00:00";
        if !git(path, &["init", "-q"], date) {
            return None;
        }

        let steps: [(&str, &[&str]); 5] = [
            (
                "2024-01-01T10:00:00+00:00",
                &["commit", "-q", "--allow-empty", "-m", "Initial import APP-1"],
            ),
            ("2024-01-01T11:00:00+00:00", &["tag", "v1"]),
            (
                "2024-02-01T10:00:00+00:00",
                &["commit", "-q", "--allow-empty", "-m", "Fix login bug APP-2"],
            ),
            ("2024-02-01T11:00:00+00:00", &["tag", "-a", "v2", "-m", "second"]),
            (
                "2024-03-01T10:00:00+00:00",
                &["commit", "-q", "--allow-empty", "-m", "Add export APP-3"],
            ),
        ];
        for (date, args) in steps {
            if !git(path, args, date) {
                return None;
            }
        }

        Some(dir)
    }

    #[test]
    fn test_git_executor_rejects_plain_directory() {
        let dir = TempDir::new().unwrap();
        match GitExecutor::new(dir.path()) {
            Err(GitError::NotARepository(path)) => assert_eq!(path, dir.path()),
            Err(GitError::GitNotAvailable) => {}
            Err(other) => panic!("expected NotARepository, got {}", other),
            Ok(_) => panic!("plain directory accepted as a repository"),
        }
    }

    #[test]
    fn test_list_tags_newest_first_with_commit_dates() {
        let Some(repo) = scratch_repo() else {
            return;
        };
        let executor = GitExecutor::new(repo.path()).unwrap();

        let tags = executor.list_tags().unwrap();
        let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["v2", "v1"]);
        assert!(tags.iter().all(|t| t.committed_at.is_some()));
        assert!(tags[1]
            .committed_at
            .as_deref()
            .unwrap()
            .starts_with("2024-01-01 10:00:00"));
    }

    #[test]
    fn test_tag_names_survive_branch_with_same_name() {
        let Some(repo) = scratch_repo() else {
            return;
        };
        if !git(repo.path(), &["branch", "v1", "v1"], "2024-03-02T10:00:00+00:00") {
            return;
        }
        let executor = GitExecutor::new(repo.path()).unwrap();

        let tags = executor.list_tags().unwrap();
        let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["v2", "v1"]);

        let boundary = crate::tags::resolve_boundary(&tags, "v2").unwrap();
        assert!(boundary.as_str().starts_with("2024-01-01 10:00:00"));
    }

    #[test]
    fn test_subjects_since_boundary() {
        let Some(repo) = scratch_repo() else {
            return;
        };
        let executor = GitExecutor::new(repo.path()).unwrap();

        let subjects = executor
            .subjects_since(&TagBoundary::new("2024-01-15 00:00:00 +0000"))
            .unwrap();
        assert_eq!(subjects, vec!["Add export APP-3", "Fix login bug APP-2"]);
    }
}
