//! Blocking HTTP client for ISS JSON endpoints.

use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::IssError;
use crate::url::BASE_URL;

/// Configuration for the ISS client.
///
/// There is no retry policy: a failed request fails the query.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout (separate from request timeout).
    pub connect_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("moexiss/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Blocking HTTP client. Each call runs on the calling thread.
#[derive(Debug, Clone)]
pub struct IssClient {
    client: Client,
    config: ClientConfig,
}

impl IssClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the configured base URL, parsed.
    ///
    /// # Errors
    ///
    /// Returns [`IssError::UrlBuild`] if the base URL is malformed.
    pub fn base_url(&self) -> Result<Url, IssError> {
        Ok(Url::parse(&self.config.base_url)?)
    }

    /// Performs a GET request and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns [`IssError::Fetch`] on transport failure or a non-success status.
    pub fn get_text(&self, url: &Url) -> Result<String, IssError> {
        debug!(%url, "requesting page");
        let response = self.client.get(url.as_str()).send()?.error_for_status()?;
        Ok(response.text()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://iss.moex.com/iss");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("moexiss/"));
    }

    #[test]
    fn test_client_creation() {
        let client = IssClient::with_defaults();
        assert!(client.is_ok());
    }

    #[test]
    fn test_malformed_base_url() {
        let client = IssClient::new(ClientConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert!(matches!(client.base_url(), Err(IssError::UrlBuild(_))));
    }
}
