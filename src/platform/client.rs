//! HTTP client for share-link and media requests

use crate::config::Config;
use crate::error::DouyinError;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, USER_AGENT};
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder, Response};
use tracing::debug;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Redirect hops followed when expanding share links
    pub max_redirects: usize,
}

impl From<&Config> for HttpClientConfig {
    fn from(config: &Config) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_redirects: config.max_redirects,
        }
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        HttpClientConfig::from(&Config::default())
    }
}

/// Video platform HTTP client.
///
/// Holds two `reqwest` clients sharing the same headers: one with a capped
/// redirect policy for share links and one with reqwest's default policy for
/// pages and media.
#[derive(Debug, Clone)]
pub struct VideoClient {
    share_client: Client,
    client: Client,
}

impl VideoClient {
    /// Create a client with the default mobile identity
    pub fn new() -> Result<Self, DouyinError> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self, DouyinError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|e| {
                DouyinError::InvalidConfig(format!("invalid user agent: {}", e))
            })?,
        );

        let share_client = Self::builder(&headers)
            .redirect(Policy::limited(config.max_redirects))
            .build()?;
        let client = Self::builder(&headers).build()?;

        Ok(Self {
            share_client,
            client,
        })
    }

    fn builder(headers: &HeaderMap) -> ClientBuilder {
        ClientBuilder::new()
            .default_headers(headers.clone())
            .gzip(true)
            .brotli(true)
    }

    /// Follow the redirect chain of a share link and return the final URL
    pub async fn resolve_redirects(&self, url: &str) -> Result<String, DouyinError> {
        debug!("Following redirects for {}", url);
        let response = self.share_client.get(url).send().await?.error_for_status()?;
        let final_url = response.url().to_string();
        debug!("Share link resolved to {}", final_url);

        if final_url.is_empty() {
            Ok(url.to_string())
        } else {
            Ok(final_url)
        }
    }

    /// Fetch a page body as text
    pub async fn fetch_text(&self, url: &str) -> Result<String, DouyinError> {
        debug!("Fetching page {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// Start a streaming GET; the body is not read yet
    pub async fn fetch_stream(&self, url: &str) -> Result<Response, DouyinError> {
        debug!("Opening media stream {}", url);
        Ok(self.client.get(url).send().await?.error_for_status()?)
    }
}

/// Expected body size from the `content-length` header, 0 when unknown
pub fn content_length(headers: &HeaderMap) -> u64 {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MOBILE_USER_AGENT;

    #[test]
    fn test_content_length() {
        let mut headers = HeaderMap::new();
        assert_eq!(content_length(&headers), 0);

        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("1024"));
        assert_eq!(content_length(&headers), 1024);

        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("abc"));
        assert_eq!(content_length(&headers), 0);
    }

    #[test]
    fn test_config_from_app_config() {
        let config = HttpClientConfig::default();
        assert_eq!(config.user_agent, MOBILE_USER_AGENT);
        assert_eq!(config.max_redirects, 5);
    }

    #[test]
    fn test_invalid_user_agent() {
        let config = HttpClientConfig {
            user_agent: "bad\nagent".to_string(),
            max_redirects: 5,
        };
        let err = VideoClient::with_config(config).unwrap_err();
        assert!(matches!(err, DouyinError::InvalidConfig(_)));
        assert!(err.to_string().starts_with("Invalid configuration: invalid user agent"));
    }

    #[tokio::test]
    async fn test_sends_mobile_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/page")
            .match_header("user-agent", MOBILE_USER_AGENT)
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        let client = VideoClient::new().unwrap();
        let body = client
            .fetch_text(&format!("{}/page", server.url()))
            .await
            .unwrap();

        assert_eq!(body, "ok");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_resolve_redirects() {
        let mut server = mockito::Server::new_async().await;
        let target = format!("{}/share/video/123456/", server.url());
        server
            .mock("GET", "/s/abc")
            .with_status(302)
            .with_header("location", &target)
            .create_async()
            .await;
        server
            .mock("GET", "/share/video/123456/")
            .with_status(200)
            .create_async()
            .await;

        let client = VideoClient::new().unwrap();
        let final_url = client
            .resolve_redirects(&format!("{}/s/abc", server.url()))
            .await
            .unwrap();
        assert_eq!(final_url, target);
    }

    #[tokio::test]
    async fn test_resolve_without_redirect_keeps_url() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/plain")
            .with_status(200)
            .create_async()
            .await;

        let client = VideoClient::new().unwrap();
        let url = format!("{}/plain", server.url());
        assert_eq!(client.resolve_redirects(&url).await.unwrap(), url);
    }

    #[tokio::test]
    async fn test_redirect_cap() {
        let mut server = mockito::Server::new_async().await;
        let looping = format!("{}/loop", server.url());
        server
            .mock("GET", "/loop")
            .with_status(302)
            .with_header("location", &looping)
            .create_async()
            .await;

        let client = VideoClient::new().unwrap();
        assert!(client.resolve_redirects(&looping).await.is_err());
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let client = VideoClient::new().unwrap();
        let result = client
            .fetch_text(&format!("{}/missing", server.url()))
            .await;
        assert!(matches!(result, Err(DouyinError::Http(_))));
    }
}
