//! Connection settings for the tracker client.

use std::fmt;
use std::time::Duration;

/// Default API version spoken by the client.
pub const DEFAULT_API_VERSION: &str = "2";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable tracker connection settings, built once at startup.
#[derive(Clone)]
pub struct TrackerConfig {
    /// Scheme and host, e.g. `https://jira.example.com`.
    pub base_url: String,
    /// REST API version segment (`/rest/api/<version>`).
    pub api_version: String,
    pub username: String,
    pub password: String,
    /// Skip TLS certificate verification.
    pub accept_invalid_certs: bool,
    pub timeout: Duration,
}

impl TrackerConfig {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            username: username.into(),
            password: password.into(),
            accept_invalid_certs: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL for an API path such as `/issue/REL-1`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/rest/api/{}{}", self.base_url, self.api_version, path)
    }
}

impl fmt::Debug for TrackerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_uses_version_and_trims_slash() {
        let config = TrackerConfig::new("https://jira.example.com/", "u", "p");
        assert_eq!(
            config.api_url("/issue/REL-1"),
            "https://jira.example.com/rest/api/2/issue/REL-1"
        );

        let config = config.with_api_version("3");
        assert_eq!(
            config.api_url("/issueLink"),
            "https://jira.example.com/rest/api/3/issueLink"
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = TrackerConfig::new("https://jira.example.com", "me", "hunter2");
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("me"));
        assert!(!rendered.contains("hunter2"));
    }
}
