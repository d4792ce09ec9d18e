//! Release Linker Library
//!
//! Finds the issue keys referenced by commit subjects made since the tag
//! preceding a release tag, compares them with the issues already linked to
//! the release ticket, and creates the missing links one at a time.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod extract;
pub mod git_history;
pub mod pipeline;
pub mod reconcile;
pub mod tags;

#[cfg(test)]
mod testing;

pub use config::{Credentials, LinkerSettings};
pub use dispatch::{dispatch, DispatchOptions, DispatchReport, LinkOutcome, LinkQueue, LinkResult};
pub use error::{LinkerError, LinkerResult};
pub use git_history::{CommitHistory, GitExecutor};
pub use pipeline::{run, RunSummary};
pub use tags::TagBoundary;
