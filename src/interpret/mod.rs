pub mod chat;
pub mod heuristic;

pub use chat::ChatInterpreter;
pub use heuristic::HeuristicInterpreter;

use crate::config::{InterpreterConfig, PipelineConfig};
use crate::error::MenuError;
use async_trait::async_trait;

/// Turns raw page text plus an instruction into (ideally) menu JSON
///
/// The returned text is not trusted; callers validate it with
/// [`MenuRecord::from_output`](crate::results::MenuRecord::from_output).
#[async_trait]
pub trait InterpretationService: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Interpret `content` according to `instruction`
    async fn interpret(&self, instruction: &str, content: &str) -> Result<String, MenuError>;
}

/// Builds the interpretation service selected by the configuration
pub fn from_config(config: &PipelineConfig) -> Result<Box<dyn InterpretationService>, MenuError> {
    match &config.interpreter {
        InterpreterConfig::Heuristic => Ok(Box::new(HeuristicInterpreter::new())),
        // Completions use their own bound, not the fetch timeout
        InterpreterConfig::Chat(chat) => Ok(Box::new(ChatInterpreter::from_env(chat)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChatConfig;

    #[test]
    fn test_from_config() {
        let interpreter = from_config(&PipelineConfig::default()).unwrap();
        assert_eq!(interpreter.name(), "heuristic");

        let config = PipelineConfig {
            interpreter: InterpreterConfig::Chat(ChatConfig {
                api_key_env: "MENU_FINDER_TEST_MISSING_KEY".to_string(),
                ..ChatConfig::default()
            }),
            ..PipelineConfig::default()
        };
        assert!(matches!(from_config(&config), Err(MenuError::Config(_))));
    }
}
