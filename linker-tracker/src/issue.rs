//! Issue keys, link graphs and link requests.

use crate::error::TrackerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A canonical `PROJECTKEY-NUMBER` issue identifier.
///
/// The project key is one or more ASCII letters (case kept as found), the
/// number one or more ASCII digits. Keys are only built through
/// [`IssueKey::parse`], so every value upholds that shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IssueKey(String);

impl IssueKey {
    /// Parse and validate an issue key.
    pub fn parse(raw: &str) -> Result<Self, TrackerError> {
        if is_canonical(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(TrackerError::invalid_key(raw))
        }
    }

    /// The project part of the key (`PROJ` in `PROJ-12`).
    pub fn project(&self) -> &str {
        self.0.split_once('-').map(|(project, _)| project).unwrap_or("")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_canonical(raw: &str) -> bool {
    match raw.split_once('-') {
        Some((project, number)) => {
            !project.is_empty()
                && !number.is_empty()
                && project.chars().all(|c| c.is_ascii_alphabetic())
                && number.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IssueKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for IssueKey {
    type Error = TrackerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<IssueKey> for String {
    fn from(key: IssueKey) -> Self {
        key.0
    }
}

/// Direction of a link as seen from the issue that carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDirection {
    /// The other issue points at this one.
    Inward,
    /// This issue points at the other one.
    Outward,
}

/// One edge of an issue's link graph.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueLink {
    pub link_type: String,
    pub direction: LinkDirection,
    pub other: IssueKey,
}

/// An issue together with its link graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub key: IssueKey,
    pub links: Vec<IssueLink>,
}

impl Issue {
    /// Keys of every issue linked in the inward direction, in link order.
    pub fn inward_keys(&self) -> Vec<IssueKey> {
        self.links
            .iter()
            .filter(|link| link.direction == LinkDirection::Inward)
            .map(|link| link.other.clone())
            .collect()
    }
}

/// Request to create one typed link between two issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRequest {
    pub link_type: String,
    pub outward: IssueKey,
    pub inward: IssueKey,
}

impl LinkRequest {
    pub fn new(link_type: impl Into<String>, outward: IssueKey, inward: IssueKey) -> Self {
        Self {
            link_type: link_type.into(),
            outward,
            inward,
        }
    }
}
