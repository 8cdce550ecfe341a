use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const OPENAI_V1: &str = "https://api.openai.com/v1/";

// generation can be slow, so the default is generous
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 300;

/// Immutable settings of a `Client`. The API key is passed separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub organization: Option<String>,
    /// Append one ledger line per completion to this file.
    pub request_log: Option<PathBuf>
}

impl Default for ClientConfig {

    fn default() -> Self {
        ClientConfig {
            base_url: OPENAI_V1.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            organization: None,
            request_log: None
        }
    }

}

impl ClientConfig {

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn with_request_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.request_log = Some(path.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Joins a relative endpoint path onto the base URL.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_endpoint_url_joins_slashes() {

        let config = ClientConfig::default();

        assert_eq!(config.endpoint_url("chat/completions"), "https://api.openai.com/v1/chat/completions");
        assert_eq!(config.endpoint_url("/chat/completions"), "https://api.openai.com/v1/chat/completions");

        let config = config.with_base_url("http://127.0.0.1:8080");
        assert_eq!(config.endpoint_url("chat/completions"), "http://127.0.0.1:8080/chat/completions");

    }

    #[test]
    fn test_partial_config_uses_defaults() {

        let config: ClientConfig = serde_json::from_str(r#"{"organization": "org-1"}"#).unwrap();

        assert_eq!(config.base_url, OPENAI_V1);
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECONDS));
        assert_eq!(config.organization.as_deref(), Some("org-1"));
        assert!(config.request_log.is_none());

    }

}
