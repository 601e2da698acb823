use crate::error::{MenuError, NetworkError};
use crate::fetchers::Fetcher;
use async_trait::async_trait;
use std::time::Duration;

/// Fetches pages with a plain HTTP GET
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher sending `user_agent` and giving up after `timeout`
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, MenuError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| MenuError::Config(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, NetworkError> {
        ::log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| NetworkError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Invalid UTF-8 is replaced, never rejected
        let body = response
            .text()
            .await
            .map_err(|e| NetworkError::from_reqwest(url, e))?;

        ::log::debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
