//! In-memory collaborators for tests.

use crate::git_history::{CommitHistory, GitError, TagRef};
use crate::tags::TagBoundary;
use async_trait::async_trait;
use release_linker_tracker::{
    Issue, IssueKey, IssueLink, IssueTracker, LinkDirection, LinkRequest, Result, TrackerError,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Tracker double that records link requests and can be told to fail.
#[derive(Default)]
pub struct FakeTracker {
    inward: HashMap<String, Vec<IssueKey>>,
    fail_fetch: bool,
    failing_links: HashSet<String>,
    created: Mutex<Vec<LinkRequest>>,
    fetches: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `ticket` already has `keys` linked inward.
    pub fn with_inward_links(mut self, ticket: &str, keys: &[&str]) -> Self {
        let keys = keys.iter().map(|k| IssueKey::parse(k).unwrap()).collect();
        self.inward.insert(ticket.to_string(), keys);
        self
    }

    pub fn failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    pub fn failing_link(mut self, inward: &str) -> Self {
        self.failing_links.insert(inward.to_string());
        self
    }

    pub fn created(&self) -> Vec<LinkRequest> {
        self.created.lock().unwrap().clone()
    }

    pub fn created_inward_keys(&self) -> Vec<String> {
        self.created()
            .into_iter()
            .map(|r| r.inward.to_string())
            .collect()
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IssueTracker for FakeTracker {
    async fn fetch_issue(&self, key: &IssueKey) -> Result<Issue> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch {
            return Err(TrackerError::request(503, "Service Unavailable", "down"));
        }

        let links = self
            .inward
            .get(key.as_str())
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|other| IssueLink {
                link_type: "Release Decision".to_string(),
                direction: LinkDirection::Inward,
                other,
            })
            .collect();

        Ok(Issue {
            key: key.clone(),
            links,
        })
    }

    async fn create_link(&self, request: &LinkRequest) -> Result<()> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_links.contains(request.inward.as_str()) {
            return Err(TrackerError::request(
                400,
                "Bad Request",
                format!("Issue {} does not exist", request.inward),
            ));
        }

        self.created.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn link_types(&self) -> Result<Vec<String>> {
        Ok(vec!["Blocks".to_string(), "Release Decision".to_string()])
    }
}

/// Fixed tag listing and subject log.
pub struct StaticHistory {
    pub tags: Vec<TagRef>,
    pub subjects: Vec<String>,
    pub requested_since: Mutex<Vec<TagBoundary>>,
}

impl StaticHistory {
    pub fn new(tags: Vec<TagRef>, subjects: &[&str]) -> Self {
        Self {
            tags,
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
            requested_since: Mutex::new(Vec::new()),
        }
    }
}

impl CommitHistory for StaticHistory {
    fn list_tags(&self) -> std::result::Result<Vec<TagRef>, GitError> {
        Ok(self.tags.clone())
    }

    fn subjects_since(&self, since: &TagBoundary) -> std::result::Result<Vec<String>, GitError> {
        self.requested_since.lock().unwrap().push(since.clone());
        Ok(self.subjects.clone())
    }
}
