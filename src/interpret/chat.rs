use crate::config::ChatConfig;
use crate::error::{MenuError, NetworkError};
use crate::interpret::InterpretationService;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Interpretation through an OpenAI-compatible chat completions endpoint
pub struct ChatInterpreter {
    client: reqwest::Client,
    completions_url: String,
    model: String,
    api_key: String,
    max_tokens: u32,
}

impl ChatInterpreter {
    pub fn new(config: &ChatConfig, api_key: String) -> Result<Self, MenuError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| MenuError::Config(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            completions_url: format!("{}/chat/completions", config.endpoint.trim_end_matches('/')),
            model: config.model.clone(),
            api_key,
            max_tokens: config.max_tokens,
        })
    }

    /// Create an interpreter reading its API key from `config.api_key_env`
    pub fn from_env(config: &ChatConfig) -> Result<Self, MenuError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                MenuError::Config(format!(
                    "{} is not set; the chat interpreter needs an API key",
                    config.api_key_env
                ))
            })?;
        Self::new(config, api_key)
    }
}

#[async_trait]
impl InterpretationService for ChatInterpreter {
    fn name(&self) -> &str {
        "chat"
    }

    async fn interpret(&self, instruction: &str, content: &str) -> Result<String, MenuError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: instruction,
                },
                ChatMessage {
                    role: "user",
                    content,
                },
            ],
            max_tokens: self.max_tokens,
        };

        ::log::debug!(
            "Sending {} characters to {} ({})",
            content.len(),
            self.completions_url,
            self.model
        );

        let url = self.completions_url.as_str();
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| NetworkError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            MenuError::Interpretation(format!("unexpected completion response: {}", e))
        })?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| MenuError::Interpretation("completion returned no content".to_string()))
    }
}
