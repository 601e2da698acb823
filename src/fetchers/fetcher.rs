use crate::error::NetworkError;
use async_trait::async_trait;

/// Transport that turns a URL into a response body
///
/// Implementations bound every call by their configured timeout and report
/// unreachable hosts, timeouts, and non-success statuses as errors rather than
/// empty bodies.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` and return its body as text
    async fn fetch(&self, url: &str) -> Result<String, NetworkError>;
}
