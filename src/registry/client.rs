//! Registry HTTP client
//!
//! Minimal client for fetching listing and detail documents from the registry.
//! Each URL is fetched exactly once per run; there are no retries and no
//! response caching, only a bounded per-request timeout so that an
//! unresponsive upstream cannot stall a run indefinitely.

use core::time::Duration;
use ohno::{IntoAppError, app_err};
use url::Url;

/// A thin wrapper around [`reqwest::Client`] that returns response bodies as text.
#[derive(Debug, Clone)]
pub struct Client {
    client: reqwest::Client,
}

impl Client {
    /// Create a new client with the given per-request timeout.
    pub fn new(timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("re3harvest/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Fetch a URL and return the response body.
    ///
    /// Any non-success status is an error; interpretation (fatal for the
    /// listing request, recoverable for a detail request) is up to the caller.
    pub async fn get_text(&self, url: &Url) -> crate::Result<String> {
        log::debug!("GET {url}");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .into_app_err_with(|| format!("request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(app_err!("{url} returned HTTP {status}"));
        }

        response.text().await.into_app_err_with(|| format!("reading body of {url} failed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_text_rejects_error_status() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = Client::new(Duration::from_secs(5)).unwrap();
        let url = Url::parse(&format!("{}/boom", server.uri())).unwrap();
        let err = client.get_text(&url).await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_get_text_returns_body() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("<list/>"))
            .mount(&server)
            .await;

        let client = Client::new(Duration::from_secs(5)).unwrap();
        let url = Url::parse(&format!("{}/api/v1/repositories", server.uri())).unwrap();
        assert_eq!(client.get_text(&url).await.unwrap(), "<list/>");
    }
}
