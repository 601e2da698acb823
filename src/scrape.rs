use crate::error::MenuError;
use crate::fetchers::Fetcher;
use crate::parsers::html;

/// Fetches a page and flattens it to text
///
/// The body is never inspected for its content type; whatever comes back is
/// run through the HTML text extractor.
pub async fn scrape(fetcher: &dyn Fetcher, url: &str) -> Result<String, MenuError> {
    ::log::info!("Scraping menu page: {}", url);
    let start = std::time::Instant::now();

    let body = fetcher.fetch(url).await?;
    let text = html::extract_text(&body);

    ::log::debug!(
        "Scraped {} characters from {} in {:.2} seconds",
        text.len(),
        url,
        start.elapsed().as_secs_f64()
    );
    Ok(text)
}
