use crate::error::MenuError;
use crate::interpret::InterpretationService;
use crate::results::{MenuItem, MenuRecord, Price};
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;

/// A line that holds nothing but a price, e.g. `12`, `$8.5`, `4.50`
static PRICE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$?\d{1,3}(\.\d{1,2})?$").unwrap());

const DEFAULT_CATEGORY: &str = "Uncategorized";
const MAX_HEADER_LEN: usize = 40;

/// Deterministic line-based menu parser
///
/// Expects the layout produced by the text extractor, where names, prices
/// and descriptions tend to land on their own lines. The instruction is
/// ignored.
#[derive(Debug, Default)]
pub struct HeuristicInterpreter;

impl HeuristicInterpreter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl InterpretationService for HeuristicInterpreter {
    fn name(&self) -> &str {
        "heuristic"
    }

    async fn interpret(&self, _instruction: &str, content: &str) -> Result<String, MenuError> {
        let menu = parse_menu(content);
        ::log::debug!(
            "Heuristic parser found {} items in {} sections",
            menu.item_count(),
            menu.categories.len()
        );
        serde_json::to_string(&menu).map_err(|e| MenuError::Interpretation(e.to_string()))
    }
}

/// Groups priced lines of `text` into menu sections
pub fn parse_menu(text: &str) -> MenuRecord {
    let lines = menu_lines(text);
    let line_at = |i: usize| lines.get(i).copied().unwrap_or("");

    let mut menu = MenuRecord::default();
    let mut section = DEFAULT_CATEGORY;

    for (i, line) in lines.iter().copied().enumerate() {
        if is_section_header(line, line_at(i + 1)) {
            section = line;
            continue;
        }

        if !is_price(line) {
            continue;
        }

        let name = if i > 0 { line_at(i - 1) } else { "" };
        let next = line_at(i + 1);
        let description = (!next.is_empty()
            && !is_price(next)
            && !is_section_header(next, line_at(i + 2)))
        .then(|| next.to_string());

        menu.category_mut(section).push(MenuItem {
            name: name.to_string(),
            price: Price::Text(line.to_string()),
            description,
        });
    }

    menu
}

/// Trimmed, non-empty lines with navigation and add-on noise removed
fn menu_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| *line != "Back to top")
        .filter(|line| !line.starts_with("add ") && !line.starts_with("Add "))
        .collect()
}

fn is_price(line: &str) -> bool {
    PRICE_LINE.is_match(line)
}

/// Short title-cased line followed by something that is not a price
fn is_section_header(line: &str, next: &str) -> bool {
    if is_price(line) || line.chars().count() > MAX_HEADER_LEN {
        return false;
    }

    let mut chars = line.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let title_like = !first.is_lowercase() && chars.any(char::is_uppercase);

    title_like && !next.is_empty() && !is_price(next)
}
