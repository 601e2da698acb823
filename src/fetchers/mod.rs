pub mod browser;
pub mod fetcher;
pub mod http;

pub use browser::BrowserFetcher;
pub use fetcher::Fetcher;
pub use http::HttpFetcher;

use crate::config::{FetcherKind, PipelineConfig};
use crate::error::MenuError;
use std::sync::Arc;

/// Builds the fetcher selected by the configuration
pub fn from_config(config: &PipelineConfig) -> Result<Arc<dyn Fetcher>, MenuError> {
    match config.fetcher {
        FetcherKind::Http => {
            let fetcher = HttpFetcher::new(&config.user_agent, config.timeout())?;
            Ok(Arc::new(fetcher))
        }
        FetcherKind::Browser => Ok(Arc::new(BrowserFetcher::new(
            &config.webdriver_url,
            config.timeout(),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_builds_either_backend() {
        let config = PipelineConfig::default();
        assert!(from_config(&config).is_ok());

        // Building the browser fetcher does not contact WebDriver yet
        let config = PipelineConfig {
            fetcher: FetcherKind::Browser,
            ..PipelineConfig::default()
        };
        assert!(from_config(&config).is_ok());
    }
}
