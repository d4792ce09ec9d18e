//! Jira REST client.
//!
//! Speaks the `/rest/api/<version>` endpoints for reading an issue's link
//! graph and creating issue links, authenticating with HTTP basic auth.

use crate::client::IssueTracker;
use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::issue::{Issue, IssueKey, IssueLink, LinkDirection, LinkRequest};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Longest slice of a raw error body kept in diagnostics.
const MAX_ERROR_BODY: usize = 300;

/// Jira client bound to one immutable [`TrackerConfig`].
pub struct JiraClient {
    http: reqwest::Client,
    config: TrackerConfig,
}

impl JiraClient {
    /// Create a new client for the given configuration.
    pub fn new(config: TrackerConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(TrackerError::config("tracker base URL is empty"));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| TrackerError::config(format!("failed to create http client: {}", e)))?;

        log::debug!(
            "Jira client ready for {} (api v{})",
            config.base_url,
            config.api_version
        );

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(self.config.api_url(path))
            .basic_auth(&self.config.username, Some(&self.config.password))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .post(self.config.api_url(path))
            .basic_auth(&self.config.username, Some(&self.config.password))
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn fetch_issue(&self, key: &IssueKey) -> Result<Issue> {
        let response = self
            .get(&format!("/issue/{}", key))
            .query(&[("fields", "issuelinks")])
            .send()
            .await?;
        let response = check_status(response).await?;

        let issue: JiraIssue = response
            .json()
            .await
            .map_err(|e| TrackerError::invalid_response(e.to_string()))?;

        Ok(issue.into_issue(key))
    }

    async fn create_link(&self, request: &LinkRequest) -> Result<()> {
        let body = JiraLinkBody::from(request);
        let response = self.post("/issueLink").json(&body).send().await?;
        check_status(response).await?;

        log::debug!(
            "Linked {} -> {} ({})",
            request.outward,
            request.inward,
            request.link_type
        );
        Ok(())
    }

    async fn link_types(&self) -> Result<Vec<String>> {
        #[derive(Deserialize)]
        struct LinkTypesResponse {
            #[serde(rename = "issueLinkTypes")]
            issue_link_types: Vec<JiraNamed>,
        }

        let response = check_status(self.get("/issueLinkType").send().await?).await?;
        let result: LinkTypesResponse = response
            .json()
            .await
            .map_err(|e| TrackerError::invalid_response(e.to_string()))?;

        Ok(result
            .issue_link_types
            .into_iter()
            .map(|lt| lt.name)
            .collect())
    }
}

/// Turn a non-success response into a [`TrackerError::Request`].
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let name = status
        .canonical_reason()
        .unwrap_or("Unknown Status")
        .to_string();
    let body = response.text().await.unwrap_or_default();
    Err(TrackerError::request(
        status.as_u16(),
        name,
        error_message(&body),
    ))
}

/// Pull a readable message out of a Jira error body.
fn error_message(body: &str) -> String {
    #[derive(Deserialize, Default)]
    #[serde(default)]
    struct JiraErrorBody {
        #[serde(rename = "errorMessages")]
        error_messages: Vec<String>,
        errors: serde_json::Map<String, serde_json::Value>,
    }

    if let Ok(parsed) = serde_json::from_str::<JiraErrorBody>(body) {
        let mut parts = parsed.error_messages;
        parts.extend(parsed.errors.into_iter().map(|(field, value)| match value {
            serde_json::Value::String(text) => format!("{}: {}", field, text),
            other => format!("{}: {}", field, other),
        }));
        if !parts.is_empty() {
            return parts.join("; ");
        }
    }

    let trimmed = body.trim();
    if trimmed.chars().count() > MAX_ERROR_BODY {
        let cut: String = trimmed.chars().take(MAX_ERROR_BODY).collect();
        format!("{}...", cut)
    } else {
        trimmed.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct JiraIssue {
    #[serde(default)]
    fields: JiraIssueFields,
}

#[derive(Debug, Default, Deserialize)]
struct JiraIssueFields {
    #[serde(default)]
    issuelinks: Vec<JiraIssueLink>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JiraIssueLink {
    #[serde(rename = "type")]
    link_type: JiraNamed,
    inward_issue: Option<JiraKeyRef>,
    outward_issue: Option<JiraKeyRef>,
}

#[derive(Debug, Serialize, Deserialize)]
struct JiraNamed {
    name: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct JiraKeyRef {
    key: String,
}

impl JiraIssue {
    fn into_issue(self, key: &IssueKey) -> Issue {
        let mut links = Vec::new();
        for link in self.fields.issuelinks {
            let (direction, other) = match (link.inward_issue, link.outward_issue) {
                (Some(inward), _) => (LinkDirection::Inward, inward.key),
                (None, Some(outward)) => (LinkDirection::Outward, outward.key),
                (None, None) => continue,
            };

            match IssueKey::parse(&other) {
                Ok(other) => links.push(IssueLink {
                    link_type: link.link_type.name,
                    direction,
                    other,
                }),
                Err(_) => log::warn!("Ignoring link on {} to unrecognised key {}", key, other),
            }
        }

        Issue {
            key: key.clone(),
            links,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JiraLinkBody {
    #[serde(rename = "type")]
    link_type: JiraNamed,
    outward_issue: JiraKeyRef,
    inward_issue: JiraKeyRef,
}

impl From<&LinkRequest> for JiraLinkBody {
    fn from(request: &LinkRequest) -> Self {
        Self {
            link_type: JiraNamed {
                name: request.link_type.clone(),
            },
            outward_issue: JiraKeyRef {
                key: request.outward.to_string(),
            },
            inward_issue: JiraKeyRef {
                key: request.inward.to_string(),
            },
        }
    }
}
