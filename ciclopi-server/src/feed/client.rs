//! HTTP client for the CicloPi station page.

use std::future::Future;

use super::error::FeedError;

/// Default URL of the public station page.
const DEFAULT_FEED_URL: &str = "http://www.ciclopi.eu/frmLeStazioni.aspx";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Source of raw feed markup.
///
/// The cache and the board service are generic over this so tests can
/// script pages without a network.
pub trait FetchPage: Send + Sync {
    /// Fetch the raw station page.
    fn fetch(&self) -> impl Future<Output = Result<String, FeedError>> + Send;
}

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// URL of the station page.
    pub url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl FeedConfig {
    /// Set a custom feed URL (for testing against a local server).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// reqwest-backed page fetcher.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    url: String,
}

impl FeedClient {
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }
}

impl FetchPage for FeedClient {
    async fn fetch(&self) -> Result<String, FeedError> {
        tracing::debug!(url = %self.url, "fetching station feed");

        let response = self.http.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = FeedConfig::default();
        assert_eq!(config.url, DEFAULT_FEED_URL);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn config_builders() {
        let config = FeedConfig::default()
            .with_url("http://localhost:8080/stazioni")
            .with_timeout(3);
        assert_eq!(config.url, "http://localhost:8080/stazioni");
        assert_eq!(config.timeout_secs, 3);
    }
}
