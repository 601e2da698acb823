use crate::error::MenuError;
use crate::fetchers::Fetcher;
use crate::parsers::html;
use crate::results::{MenuUrl, SearchResultLink};
use url::Url;

/// Finds the most plausible menu page for a restaurant through a web search
pub struct MenuLocator<'a> {
    fetcher: &'a dyn Fetcher,
    search_url: &'a str,
}

impl<'a> MenuLocator<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, search_url: &'a str) -> Self {
        Self {
            fetcher,
            search_url,
        }
    }

    /// Searches for `"<query> menu"` and picks a link from the results page
    ///
    /// Returns `MenuUrl::NotFound` when the results page has no links. Any
    /// transport failure is returned as `MenuError::Network`.
    pub async fn locate(&self, query: &str) -> Result<MenuUrl, MenuError> {
        let request_url = search_request_url(self.search_url, query)?;
        ::log::info!("Searching for menu: {}", query);

        let body = self.fetcher.fetch(request_url.as_str()).await?;

        let links = html::extract_links(&body);
        let selected = select_menu_link(&links);
        match &selected {
            MenuUrl::Found(href) => ::log::info!("Selected menu link: {}", href),
            MenuUrl::NotFound => ::log::warn!("Search results for '{}' contain no links", query),
        }

        Ok(selected)
    }
}

/// Builds the search provider request for `query`
pub fn search_request_url(search_url: &str, query: &str) -> Result<Url, MenuError> {
    let search_query = format!("{} menu", query);
    Url::parse_with_params(
        search_url,
        &[("q", search_query.as_str()), ("t", "h_"), ("ia", "web")],
    )
    .map_err(|e| MenuError::Config(format!("invalid search URL '{}': {}", search_url, e)))
}

/// Picks a menu link from search results
///
/// Walks the links in document order and returns the first one whose href or
/// text mentions "menu", or whose href ends in ".pdf" (all case-insensitive).
/// Falls back to the first link, then to `NotFound`.
pub fn select_menu_link(links: &[SearchResultLink]) -> MenuUrl {
    if let Some(link) = links.iter().find(|link| is_menu_candidate(link)) {
        ::log::debug!("Link '{}' ({}) looks like a menu", link.text, link.href);
        return MenuUrl::from(link.href.clone());
    }

    match links.first() {
        Some(first) => {
            ::log::debug!("No menu-like link, falling back to {}", first.href);
            MenuUrl::from(first.href.clone())
        }
        None => MenuUrl::NotFound,
    }
}

/// Whether a single link satisfies any of the menu predicates
pub fn is_menu_candidate(link: &SearchResultLink) -> bool {
    let href = link.href.to_lowercase();
    href.contains("menu") || link.text.to_lowercase().contains("menu") || href.ends_with(".pdf")
}
