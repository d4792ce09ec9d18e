//! Tracker abstraction used by the linking pipeline.

use crate::error::Result;
use crate::issue::{Issue, IssueKey, LinkRequest};
use async_trait::async_trait;

/// Remote issue tracker operations needed to reconcile release links.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Fetch an issue together with its link graph.
    async fn fetch_issue(&self, key: &IssueKey) -> Result<Issue>;

    /// Create one typed link between two issues.
    async fn create_link(&self, request: &LinkRequest) -> Result<()>;

    /// Names of the link types the tracker knows about.
    async fn link_types(&self) -> Result<Vec<String>>;
}
