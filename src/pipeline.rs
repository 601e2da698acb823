use crate::config::PipelineConfig;
use crate::error::MenuError;
use crate::fetchers::{self, Fetcher};
use crate::interpret::{self, InterpretationService};
use crate::links::resolve_menu_url;
use crate::locator::MenuLocator;
use crate::results::{MenuRecord, MenuReport, MenuUrl};
use crate::scrape::scrape;
use std::fmt;
use std::sync::Arc;

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    UrlFound,
    Scraped,
    Decoded,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "START",
            Stage::UrlFound => "URL_FOUND",
            Stage::Scraped => "SCRAPED",
            Stage::Decoded => "DECODED",
            Stage::Done => "DONE",
        };
        f.write_str(name)
    }
}

/// Runs locate, scrape and interpret one after another
///
/// Every stage feeds the next; the first error ends the run.
pub struct MenuPipeline {
    config: PipelineConfig,
    fetcher: Arc<dyn Fetcher>,
    interpreter: Box<dyn InterpretationService>,
}

impl MenuPipeline {
    /// Create a pipeline with the fetcher and interpreter the configuration names
    pub fn new(config: PipelineConfig) -> Result<Self, MenuError> {
        let fetcher = fetchers::from_config(&config)?;
        let interpreter = interpret::from_config(&config)?;
        Ok(Self {
            config,
            fetcher,
            interpreter,
        })
    }

    /// Replace the transport
    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Replace the interpretation service
    pub fn with_interpreter(mut self, interpreter: Box<dyn InterpretationService>) -> Self {
        self.interpreter = interpreter;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Locates and scrapes the menu for `query`, skipping interpretation
    ///
    /// A `NotFound` location is not special-cased: the empty URL goes to the
    /// scraper and the fetch fails.
    pub async fn scrape_only(&self, query: &str) -> Result<(MenuUrl, String), MenuError> {
        let located = self.locate_stage(query).await?;
        let raw_text = self.scrape_stage(&located).await?;
        Ok((located, raw_text))
    }

    /// Full run from query to validated menu
    pub async fn run(&self, query: &str) -> Result<MenuReport, MenuError> {
        let located = self.locate_stage(query).await?;
        let raw_text = self.scrape_stage(&located).await?;

        let output = self
            .interpreter
            .interpret(&self.config.instruction, &raw_text)
            .await?;
        let menu = MenuRecord::from_output(&output)?;
        log_transition(Stage::Scraped, Stage::Decoded);
        ::log::info!(
            "{} interpreter produced {} items in {} categories",
            self.interpreter.name(),
            menu.item_count(),
            menu.categories.len()
        );

        let report = MenuReport {
            query: query.to_string(),
            url: resolve_menu_url(&self.config.search_url, &located),
            raw_text,
            menu,
        };
        log_transition(Stage::Decoded, Stage::Done);
        Ok(report)
    }

    async fn locate_stage(&self, query: &str) -> Result<MenuUrl, MenuError> {
        let locator = MenuLocator::new(self.fetcher.as_ref(), &self.config.search_url);
        let located = locator.locate(query).await?;
        log_transition(Stage::Start, Stage::UrlFound);
        Ok(located)
    }

    async fn scrape_stage(&self, located: &MenuUrl) -> Result<String, MenuError> {
        if !located.is_found() {
            ::log::warn!("No menu URL discovered, scraping anyway");
        }
        let url = resolve_menu_url(&self.config.search_url, located);
        let raw_text = scrape(self.fetcher.as_ref(), &url).await?;
        log_transition(Stage::UrlFound, Stage::Scraped);
        Ok(raw_text)
    }
}

fn log_transition(from: Stage, to: Stage) {
    ::log::info!("Pipeline {} -> {}", from, to);
}
