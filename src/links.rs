use crate::results::MenuUrl;
use url::Url;

/// Query parameter DuckDuckGo uses to wrap the real destination of a result
const REDIRECT_PARAM: &str = "uddg";

/// Turns a located href into the URL that should be fetched
///
/// Relative and protocol-relative hrefs are joined against the search URL,
/// and search-provider redirect wrappers are unwrapped. `NotFound` stays the
/// empty string, and hrefs that cannot be resolved are passed through
/// unchanged so the fetch reports the problem.
pub fn resolve_menu_url(search_url: &str, located: &MenuUrl) -> String {
    let href = match located {
        MenuUrl::Found(href) => href,
        MenuUrl::NotFound => return String::new(),
    };

    let resolved = match Url::parse(href) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            match Url::parse(search_url).and_then(|base| base.join(href)) {
                Ok(url) => url,
                Err(e) => {
                    ::log::debug!("Cannot resolve {} against {}: {}", href, search_url, e);
                    return href.clone();
                }
            }
        }
        Err(e) => {
            ::log::debug!("Cannot parse located href {}: {}", href, e);
            return href.clone();
        }
    };

    match unwrap_redirect(&resolved) {
        Some(target) => {
            ::log::debug!("Unwrapped redirect {} -> {}", resolved, target);
            target
        }
        None => resolved.to_string(),
    }
}

/// Extracts the destination from a search-provider redirect link
pub fn unwrap_redirect(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == REDIRECT_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|target| !target.is_empty())
}
