use crate::results::SearchResultLink;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Elements whose text is never part of the visible page
const SKIPPED_ELEMENTS: &[&str] = &["head", "script", "style", "noscript", "template"];

/// Flattens an HTML document into newline-separated text
///
/// Every text node is trimmed, empty fragments are dropped, and the rest are
/// joined with `\n` in document order. The parser never fails; malformed
/// markup (or a body that is not HTML at all) yields whatever text nodes the
/// parser recovered, possibly none.
pub fn extract_text(html: &str) -> String {
    let doc = Html::parse_document(html);

    let mut fragments = Vec::new();
    collect_text(doc.root_element(), &mut fragments);

    ::log::debug!("HTML extractor found {} text fragments", fragments.len());
    fragments.join("\n")
}

fn collect_text<'a>(element: ElementRef<'a>, fragments: &mut Vec<&'a str>) {
    if SKIPPED_ELEMENTS.contains(&element.value().name()) {
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    fragments.push(trimmed);
                }
            }
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, fragments);
                }
            }
            _ => {}
        }
    }
}

/// Extracts every anchor carrying an `href`, in document order
///
/// The visible text of each anchor is its text nodes trimmed and joined with
/// single spaces. Duplicates are kept.
pub fn extract_links(html: &str) -> Vec<SearchResultLink> {
    let doc = Html::parse_document(html);

    let links = doc
        .select(&LINK_SELECTOR)
        .filter_map(|e| {
            let href = e.value().attr("href")?;
            let text = e
                .text()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            Some(SearchResultLink::new(href.to_string(), text))
        })
        .collect::<Vec<_>>();

    ::log::debug!("HTML parser found {} links", links.len());
    if !links.is_empty() {
        ::log::debug!(
            "First few links: {:?}",
            links.iter().take(5).map(|l| &l.href).collect::<Vec<_>>()
        );
    }

    links
}
