use std::time::{Duration, Instant};

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, Error, Result};
use crate::logger::log_request;
use crate::models::{Answer, EasyAnswer, Message};
use crate::options::{CompletionOptions, EasyOptions};

const CHAT_COMPLETIONS: &str = "chat/completions";
const ORGANIZATION_HEADER: &str = "openai-organization";

/// Chat-completion client.
///
/// Holds only immutable configuration, so one instance can serve concurrent
/// calls. Every call is a single POST; nothing is retried.
#[derive(Debug, Clone)]
pub struct Client {
    http_client: reqwest::Client,
    headers: HeaderMap,
    config: ClientConfig
}

impl Client {

    pub fn new(api_key: &str, organization: Option<&str>) -> Result<Self> {

        let mut config = ClientConfig::default();
        if let Some(organization) = organization {
            config = config.with_organization(organization);
        }
        Self::with_config(api_key, config)

    }

    pub fn with_config(api_key: &str, config: ClientConfig) -> Result<Self> {

        if api_key.trim().is_empty() {
            return Err(Error::Config("API key must not be empty".to_string()));
        }

        let mut headers = HeaderMap::new();

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| Error::Config("API key is not a valid header value".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(organization) = config.organization.as_deref().filter(|org| !org.is_empty()) {
            let value = HeaderValue::from_str(organization)
                .map_err(|_| Error::Config("organization is not a valid header value".to_string()))?;
            headers.insert(HeaderName::from_static(ORGANIZATION_HEADER), value);
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Client {
            http_client,
            headers,
            config
        })

    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// POSTs `payload` to `endpoint` (relative to the base URL) and decodes a
    /// 200 response body into `T`.
    ///
    /// Any other status fails with [`ApiError::Status`] carrying the raw body.
    /// A body that does not match `T` fails with [`Error::Decode`].
    pub async fn call<T, P>(&self, endpoint: &str, payload: &P) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {

        let url = self.config.endpoint_url(endpoint);
        debug!(%url, "sending request");

        let response = self.http_client
            .post(&url)
            .headers(self.headers.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();

        if status != StatusCode::OK {
            // keep the status even when the error body cannot be read
            let body = response.text().await.unwrap_or_else(|err| {
                warn!(%url, %status, error = %err, "failed to read error body");
                String::new()
            });
            warn!(%url, %status, "request failed");
            return Err(ApiError::Status { status, body }.into());
        }

        let body = response.text().await?;

        debug!(%url, bytes = body.len(), "received response");

        serde_json::from_str(&body).map_err(|source| Error::Decode { source, body })

    }

    /// [`Client::call`] with an empty JSON object as payload.
    pub async fn call_empty<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.call(endpoint, &serde_json::Map::new()).await
    }

    /// Sends the transcript to the chat-completion endpoint.
    pub async fn complete(&self, messages: &[Message], options: &CompletionOptions) -> Result<Answer> {

        if messages.is_empty() {
            warn!("refusing to send an empty transcript");
            return Err(ApiError::EmptyMessages.into());
        }

        let request = options.to_request(messages);
        let started = Instant::now();

        let result: Result<Answer> = self.call(CHAT_COMPLETIONS, &request).await;

        let elapsed = started.elapsed();
        match &result {
            Ok(answer) => {
                debug!(
                    model = %answer.model,
                    choices = answer.choices.len(),
                    total_tokens = answer.usage.total_tokens,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "completion finished"
                );
                self.write_ledger(StatusCode::OK, &answer.model, answer.usage.total_tokens, elapsed).await;
            }
            Err(err) => {
                // a body that failed to decode still came back with 200
                let status = match err {
                    Error::Decode { .. } => Some(StatusCode::OK),
                    _ => err.status()
                };
                if let Some(status) = status {
                    self.write_ledger(status, request.model, 0, elapsed).await;
                }
            }
        }

        result

    }

    async fn write_ledger(&self, status: StatusCode, model: &str, tokens: u64, elapsed: Duration) {

        let Some(path) = self.config.request_log.clone() else {
            return;
        };
        let model = model.to_string();

        let written = tokio::task::spawn_blocking(move || {
            log_request(&path, status.as_u16(), &model, tokens, elapsed)
        }).await;

        if let Err(err) = written {
            warn!(error = %err, "request log task failed");
        }

    }

    /// Single-prompt shortcut over [`Client::complete`].
    ///
    /// Returns [`EasyAnswer::Structured`] when `options` asked for JSON and
    /// [`EasyAnswer::Text`] otherwise.
    pub async fn easy_complete(&self, prompt: &str, options: &EasyOptions) -> Result<EasyAnswer> {

        let messages = options.transcript(prompt);
        let answer = self.complete(&messages, &options.completion).await?;

        let primary = answer.primary().ok_or(ApiError::NoResponse)?;

        if options.completion.json {
            let value = primary.json().ok_or(ApiError::NoJsonResponse)?;
            Ok(EasyAnswer::Structured(value))
        } else {
            Ok(EasyAnswer::Text(primary.message.content.clone()))
        }

    }

}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_empty_api_key_rejected() {

        let result = Client::new("  ", None);

        assert!(matches!(result, Err(Error::Config(_))));

    }

    #[test]
    fn test_headers_with_organization() {

        let client = Client::new("sk-test", Some("org-42")).unwrap();

        assert_eq!(client.headers[AUTHORIZATION], "Bearer sk-test");
        assert_eq!(client.headers[CONTENT_TYPE], "application/json");
        assert_eq!(client.headers[ORGANIZATION_HEADER], "org-42");
        assert!(client.headers[AUTHORIZATION].is_sensitive());

    }

    #[test]
    fn test_headers_without_organization() {

        let client = Client::new("sk-test", None).unwrap();

        assert!(!client.headers.contains_key(ORGANIZATION_HEADER));
        assert_eq!(client.headers.len(), 2);

    }

    #[test]
    fn test_key_with_newline_rejected() {

        let result = Client::new("sk-\ntest", None);

        assert!(matches!(result, Err(Error::Config(_))));

    }

    #[tokio::test]
    async fn test_empty_transcript_fails_before_network() {

        // nothing listens here; the call must not get that far
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:9");
        let client = Client::with_config("sk-test", config).unwrap();

        let err = client.complete(&[], &CompletionOptions::new()).await.unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::EmptyMessages)));

    }

}
