//! Finds a restaurant's menu on the web, scrapes its text and decodes it into
//! category/name/price records.

pub mod config;
pub mod error;
pub mod fetchers;
pub mod interpret;
pub mod links;
pub mod locator;
pub mod parsers;
pub mod pipeline;
pub mod results;
pub mod scrape;

#[cfg(test)]
mod tests;

// Re-export commonly used types for convenience
pub use config::PipelineConfig;
pub use error::{MenuError, NetworkError};
pub use pipeline::MenuPipeline;
pub use results::{MenuRecord, MenuReport, MenuUrl, SearchResultLink};
