use crate::error::MenuError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Instruction handed to the interpretation service together with the page text
pub const DEFAULT_INSTRUCTION: &str = "Convert the following raw restaurant menu text into \
    a JSON object. Each key is a menu category name and each value is an array of items, \
    where every item has a \"name\" string and a \"price\" (string or number). Respond with \
    the JSON object only.";

/// Which transport fetches search and menu pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetcherKind {
    /// Plain HTTP GET
    Http,
    /// WebDriver-controlled browser, for script-rendered pages
    Browser,
}

/// Settings for an OpenAI-compatible chat completions endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Base URL; `/chat/completions` is appended
    #[serde(default = "default_chat_endpoint")]
    pub endpoint: String,

    /// Model name sent with each request
    #[serde(default = "default_chat_model")]
    pub model: String,

    /// Environment variable holding the bearer token
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Completion length limit
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Bound on a single completion request, in seconds
    #[serde(default = "default_chat_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: default_chat_endpoint(),
            model: default_chat_model(),
            api_key_env: default_api_key_env(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_chat_timeout_secs(),
        }
    }
}

/// Which interpretation service decodes the scraped text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InterpreterConfig {
    /// Line-based parser, no external calls
    #[default]
    Heuristic,
    /// Chat completions API
    Chat(ChatConfig),
}

/// Configuration for a menu pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Search provider HTML endpoint
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Bound on every individual fetch, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Transport used for search and page fetches
    #[serde(default = "default_fetcher")]
    pub fetcher: FetcherKind,

    /// URL for the WebDriver instance (browser fetcher only)
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Instruction passed to the interpretation service
    #[serde(default = "default_instruction")]
    pub instruction: String,

    /// Interpretation service settings
    #[serde(default)]
    pub interpreter: InterpreterConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            fetcher: default_fetcher(),
            webdriver_url: default_webdriver_url(),
            instruction: default_instruction(),
            interpreter: InterpreterConfig::default(),
        }
    }
}

impl ChatConfig {
    /// Completion bound as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MenuError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| MenuError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, MenuError> {
        serde_json::from_str(json).map_err(|e| MenuError::Config(e.to_string()))
    }

    /// Fetch bound as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Applies environment overrides
    pub fn apply_env(&mut self) {
        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
    }
}

fn default_search_url() -> String {
    "https://duckduckgo.com/html".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (menu-finder)".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_fetcher() -> FetcherKind {
    FetcherKind::Http
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_instruction() -> String {
    DEFAULT_INSTRUCTION.to_string()
}

fn default_chat_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_chat_timeout_secs() -> u64 {
    120
}
