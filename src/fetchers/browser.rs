use crate::error::NetworkError;
use crate::fetchers::Fetcher;
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};
use std::time::Duration;
use tokio::time::timeout;

/// Fetches pages through a WebDriver-controlled browser
///
/// Each fetch opens its own session, navigates, reads the rendered source and
/// closes the session again. Useful for menus that only appear after scripts
/// run. WebDriver does not expose the HTTP status, so error pages come back as
/// ordinary content.
pub struct BrowserFetcher {
    webdriver_url: String,
    timeout: Duration,
}

impl BrowserFetcher {
    pub fn new(webdriver_url: &str, timeout: Duration) -> Self {
        Self {
            webdriver_url: webdriver_url.to_string(),
            timeout,
        }
    }

    async fn connect(&self, url: &str) -> Result<Client, NetworkError> {
        ClientBuilder::native()
            .connect(&self.webdriver_url)
            .await
            .map_err(|e| {
                ::log::error!(
                    "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
                );
                NetworkError::Browser {
                    url: url.to_string(),
                    message: format!(
                        "cannot connect to WebDriver at {}: {}",
                        self.webdriver_url, e
                    ),
                }
            })
    }

    async fn load(&self, client: &Client, url: &str) -> Result<String, NetworkError> {
        client.goto(url).await.map_err(|e| NetworkError::Browser {
            url: url.to_string(),
            message: format!("navigation failed: {}", e),
        })?;

        client.source().await.map_err(|e| NetworkError::Browser {
            url: url.to_string(),
            message: format!("cannot read page source: {}", e),
        })
    }
}

#[async_trait]
impl Fetcher for BrowserFetcher {
    async fn fetch(&self, url: &str) -> Result<String, NetworkError> {
        ::log::debug!("BROWSER GET {} via {}", url, self.webdriver_url);

        let result = timeout(self.timeout, async {
            let client = self.connect(url).await?;
            let source = self.load(&client, url).await;

            if let Err(e) = client.close().await {
                ::log::warn!("Failed to close WebDriver session: {}", e);
            }
            source
        })
        .await;

        match result {
            Ok(source) => source,
            Err(_) => {
                ::log::error!("Timeout fetching: {}", url);
                Err(NetworkError::Timeout {
                    url: url.to_string(),
                })
            }
        }
    }
}
