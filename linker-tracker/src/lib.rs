//! Release Linker Tracker Layer
//!
//! Issue tracker access for release-linker: canonical issue keys, an
//! [`IssueTracker`] trait covering the three remote operations the linking
//! pipeline needs, and a Jira REST implementation of it.
//!
//! ## Example
//!
//! ```ignore
//! use release_linker_tracker::{IssueKey, IssueTracker, JiraClient, LinkRequest, TrackerConfig};
//!
//! let config = TrackerConfig::new("https://jira.example.com", "user", "pass");
//! let jira = JiraClient::new(config)?;
//!
//! let release = IssueKey::parse("REL-100")?;
//! let already_linked = jira.fetch_issue(&release).await?.inward_keys();
//!
//! let request = LinkRequest::new("Release Decision", release, IssueKey::parse("APP-7")?);
//! jira.create_link(&request).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod issue;
pub mod jira;

// Re-exports for convenience
pub use client::IssueTracker;
pub use config::TrackerConfig;
pub use error::{Result, TrackerError};
pub use issue::{Issue, IssueKey, IssueLink, LinkDirection, LinkRequest};
pub use jira::JiraClient;
