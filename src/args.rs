use clap::{Parser, ValueEnum};
use menu_finder::config::{ChatConfig, FetcherKind, InterpreterConfig, PipelineConfig};
use menu_finder::MenuError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "menu-finder")]
#[command(about = "Finds a restaurant menu on the web and decodes it into JSON")]
#[command(version)]
pub struct Args {
    /// Restaurant name, optionally with a location
    #[arg(default_value = "Example Diner")]
    pub query: String,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Timeout in seconds for each fetch
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Transport for search and menu pages
    #[arg(long, value_enum)]
    pub fetcher: Option<FetcherArg>,

    /// Service that decodes the scraped text
    #[arg(long, value_enum)]
    pub interpreter: Option<InterpreterArg>,

    /// Print the located URL and scraped text instead of decoding it
    #[arg(long)]
    pub raw: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FetcherArg {
    Http,
    Browser,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum InterpreterArg {
    Heuristic,
    Chat,
}

impl Args {
    /// Loads the configuration file (if any) and applies command-line overrides
    pub fn pipeline_config(&self) -> Result<PipelineConfig, MenuError> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_file(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }

        if let Some(fetcher) = self.fetcher {
            config.fetcher = match fetcher {
                FetcherArg::Http => FetcherKind::Http,
                FetcherArg::Browser => FetcherKind::Browser,
            };
        }

        match self.interpreter {
            Some(InterpreterArg::Heuristic) => config.interpreter = InterpreterConfig::Heuristic,
            // Keep chat settings from the file when they are already there
            Some(InterpreterArg::Chat) => {
                if !matches!(config.interpreter, InterpreterConfig::Chat(_)) {
                    config.interpreter = InterpreterConfig::Chat(ChatConfig::default());
                }
            }
            None => {}
        }

        config.apply_env();
        Ok(config)
    }
}
