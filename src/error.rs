use thiserror::Error;

/// Transport-level failure while talking to the search provider or a target site
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The request did not complete within the configured bound
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// The server answered with a non-success status
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Connection failure, invalid URL, or unreadable body
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// WebDriver session or navigation failure
    #[error("browser fetch of {url} failed: {message}")]
    Browser { url: String, message: String },
}

impl NetworkError {
    /// Classifies a reqwest error for the given URL
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout {
                url: url.to_string(),
            }
        } else if let Some(status) = err.status() {
            NetworkError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }
        } else {
            NetworkError::Transport {
                url: url.to_string(),
                source: err,
            }
        }
    }
}

/// Errors that abort a pipeline run
#[derive(Debug, Error)]
pub enum MenuError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The interpretation service could not produce an answer
    #[error("interpretation failed: {0}")]
    Interpretation(String),

    /// The interpretation output does not match the menu schema
    #[error("invalid menu output: {0}")]
    InvalidMenu(String),

    #[error("configuration error: {0}")]
    Config(String),

    /// The validated menu could not be written out
    #[error("cannot serialize menu: {0}")]
    Output(#[source] serde_json::Error),
}

impl MenuError {
    /// Whether this error came from the transport layer
    pub fn is_network(&self) -> bool {
        matches!(self, MenuError::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_display() {
        let err = NetworkError::Status {
            url: "https://example.com/menu".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "request to https://example.com/menu returned HTTP 404"
        );

        let err: MenuError = NetworkError::Timeout {
            url: "https://example.com".to_string(),
        }
        .into();
        assert!(err.is_network());
        assert_eq!(err.to_string(), "request to https://example.com timed out");
    }

    #[test]
    fn test_non_network_errors() {
        let err = MenuError::InvalidMenu("root is not an object".to_string());
        assert!(!err.is_network());
        assert_eq!(err.to_string(), "invalid menu output: root is not an object");

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = MenuError::Output(source);
        assert!(!err.is_network());
        assert!(err.to_string().starts_with("cannot serialize menu: "));
    }
}
