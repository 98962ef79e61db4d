//! Main OTI API client implementation.

use crate::api::{DownloadApi, HostApi, QuotaApi, UrlApi};
use governor::{clock::DefaultClock, state::InMemoryState, state::NotKeyed, Quota, RateLimiter};
use oti_core::{codes, Operation, OtiError, Result};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// The OTI API base URL
pub const DEFAULT_BASE_URL: &str = "https://oti.slashnext.cloud/api";

/// Default request timeout; synchronous scans may hold the connection for minutes
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

type Limiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Main OTI API client
#[derive(Clone)]
pub struct OtiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    api_key: String,
    base_url: String,
    timeout: Duration,
    limiter: Option<Limiter>,
}

impl OtiClient {
    /// Create a new client with the given API key using default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        OtiClientBuilder::new(api_key).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(api_key: impl Into<String>) -> OtiClientBuilder {
        OtiClientBuilder::new(api_key)
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Access host endpoints
    #[must_use]
    pub fn host(&self) -> HostApi<'_> {
        HostApi::new(self)
    }

    /// Access URL scanning endpoints
    #[must_use]
    pub fn url(&self) -> UrlApi<'_> {
        UrlApi::new(self)
    }

    /// Access forensics download endpoints
    #[must_use]
    pub fn download(&self) -> DownloadApi<'_> {
        DownloadApi::new(self)
    }

    /// Access quota endpoints
    #[must_use]
    pub fn quota(&self) -> QuotaApi<'_> {
        QuotaApi::new(self)
    }

    /// POST an operation and return the raw JSON object, whatever its `errorNo`.
    pub(crate) async fn post_form(
        &self,
        operation: Operation,
        params: &[(&str, &str)],
    ) -> Result<Value> {
        if let Some(limiter) = &self.inner.limiter {
            limiter.until_ready().await;
        }

        let url = format!("{}{}", self.inner.base_url, operation.path());
        debug!(url = %url, %operation, "POST form request");

        let mut form: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
        form.extend_from_slice(params);
        form.push(("authkey", self.inner.api_key.as_str()));

        let response = self
            .inner
            .http
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| self.map_transport(&e))?;

        self.handle_response(response).await
    }

    /// POST an operation and deserialize a served response, turning a
    /// non-zero `errorNo` into an error.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        operation: Operation,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let value = self.post_form(operation, params).await?;
        Self::expect_success(value)
    }

    pub(crate) fn expect_success<T: DeserializeOwned>(value: Value) -> Result<T> {
        match codes::error_no(&value) {
            Some(codes::SUCCESS) => serde_json::from_value(value).map_err(OtiError::Json),
            Some(code) => Err(OtiError::from_service(code, codes::status_of(&value))),
            None => Err(OtiError::InvalidResponse("missing errorNo".to_string())),
        }
    }

    fn map_transport(&self, err: &reqwest::Error) -> OtiError {
        if err.is_timeout() {
            OtiError::Timeout(self.inner.timeout.as_secs())
        } else if err.is_connect() {
            OtiError::Connection(err.to_string())
        } else {
            OtiError::Http(err.to_string())
        }
    }

    /// Handle an API response that returns a JSON object
    async fn handle_response(&self, response: reqwest::Response) -> Result<Value> {
        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| self.map_transport(&e))?;
            let value: Value = serde_json::from_str(&body)?;
            if value.is_object() {
                Ok(value)
            } else {
                Err(OtiError::InvalidResponse(format!(
                    "expected a JSON object, got: {}",
                    truncate(&body, 128)
                )))
            }
        } else {
            Self::handle_error(status.as_u16(), response).await
        }
    }

    /// Convert an error response to an `OtiError`
    async fn handle_error<T>(status: u16, response: reqwest::Response) -> Result<T> {
        let reason = response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string();
        let body = response.text().await.unwrap_or_default();

        // Prefer the service's own message when the body carries one
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| codes::error_msg(&v).map(String::from))
            .unwrap_or(reason);

        match status {
            401 => Err(OtiError::Unauthorized),
            429 => {
                warn!("Rate limited by OTI API");
                Err(OtiError::Api {
                    code: status,
                    message,
                })
            }
            _ => Err(OtiError::Api {
                code: status,
                message,
            }),
        }
    }
}

/// Builder for configuring an [`OtiClient`]
pub struct OtiClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    requests_per_second: Option<u32>,
}

impl OtiClientBuilder {
    /// Create a new builder with the given API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("oti-rust/{}", env!("CARGO_PKG_VERSION")),
            requests_per_second: None,
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Cap the number of requests sent per second
    #[must_use]
    pub const fn rate_limit(mut self, requests_per_second: u32) -> Self {
        self.requests_per_second = Some(requests_per_second);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<OtiClient> {
        if self.api_key.trim().is_empty() {
            return Err(OtiError::Config("API key must not be empty".to_string()));
        }

        let base_url = self.base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url).map_err(|e| OtiError::InvalidUrl(format!("{base_url}: {e}")))?;

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| OtiError::Config(e.to_string()))?;

        let limiter = self
            .requests_per_second
            .and_then(NonZeroU32::new)
            .map(|rps| RateLimiter::direct(Quota::per_second(rps)));

        Ok(OtiClient {
            inner: Arc::new(ClientInner {
                http,
                api_key: self.api_key,
                base_url,
                timeout: self.timeout,
                limiter,
            }),
        })
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_rejects_empty_key() {
        assert!(matches!(
            OtiClient::builder("  ").build(),
            Err(OtiError::Config(_))
        ));
    }

    #[test]
    fn test_builder_rejects_bad_base_url() {
        assert!(matches!(
            OtiClient::builder("key").base_url("not a url").build(),
            Err(OtiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_builder_strips_trailing_slash() {
        let client = OtiClient::builder("key")
            .base_url("https://example.test/api/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://example.test/api");
    }

    #[test]
    fn test_expect_success_maps_codes() {
        let quota = serde_json::json!({"errorNo": 7060, "errorMsg": "quota"});
        let err = OtiClient::expect_success::<Value>(quota).unwrap_err();
        assert!(err.is_quota());

        let ok = serde_json::json!({"errorNo": 0, "errorMsg": "Success"});
        assert!(OtiClient::expect_success::<Value>(ok).is_ok());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 3), "ab");
    }
}
