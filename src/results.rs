use crate::error::MenuError;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::fmt;

/// An anchor found on a search-results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultLink {
    /// Raw `href` attribute, exactly as written in the page
    pub href: String,

    /// Visible anchor text, whitespace-trimmed
    pub text: String,
}

impl SearchResultLink {
    pub fn new(href: String, text: String) -> Self {
        Self { href, text }
    }
}

/// Outcome of menu URL discovery
///
/// `NotFound` is an expected result, not a failure. It renders as the empty
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum MenuUrl {
    Found(String),
    NotFound,
}

impl MenuUrl {
    pub fn as_str(&self) -> &str {
        match self {
            MenuUrl::Found(url) => url,
            MenuUrl::NotFound => "",
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, MenuUrl::Found(_))
    }
}

impl From<String> for MenuUrl {
    fn from(url: String) -> Self {
        if url.is_empty() {
            MenuUrl::NotFound
        } else {
            MenuUrl::Found(url)
        }
    }
}

impl From<MenuUrl> for String {
    fn from(url: MenuUrl) -> Self {
        match url {
            MenuUrl::Found(url) => url,
            MenuUrl::NotFound => String::new(),
        }
    }
}

impl fmt::Display for MenuUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price as reported by the interpretation service
///
/// Numbers keep their JSON representation, so `12` stays `12`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Text(String),
    Number(Number),
}

/// A single dish on the menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Items under one menu heading
#[derive(Debug, Clone, PartialEq)]
pub struct MenuCategory {
    pub name: String,
    pub items: Vec<MenuItem>,
}

/// Menu items grouped by category name, in menu order
///
/// Serializes as a JSON object whose keys appear in the order the
/// categories were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuRecord {
    pub categories: Vec<MenuCategory>,
}

impl MenuRecord {
    /// Validates interpretation output against the menu schema
    ///
    /// The root must be a JSON object mapping category names to arrays of
    /// items. Each item needs a string `name` and a `price` that is a string
    /// or a number; `description` is optional. A surrounding Markdown code
    /// fence is tolerated.
    pub fn from_output(raw: &str) -> Result<Self, MenuError> {
        let json = strip_code_fence(raw);
        let value: Value = serde_json::from_str(json)
            .map_err(|e| MenuError::InvalidMenu(format!("not valid JSON: {}", e)))?;

        let Value::Object(root) = value else {
            return Err(MenuError::InvalidMenu(
                "root is not an object of categories".to_string(),
            ));
        };

        let mut menu = MenuRecord::default();
        for (category, items) in root {
            let Value::Array(items) = items else {
                return Err(MenuError::InvalidMenu(format!(
                    "category '{}' is not an array",
                    category
                )));
            };

            let items = items
                .into_iter()
                .enumerate()
                .map(|(i, item)| parse_item(&category, i, item))
                .collect::<Result<Vec<_>, _>>()?;
            menu.categories.push(MenuCategory {
                name: category,
                items,
            });
        }

        Ok(menu)
    }

    /// Items of the category called `name`
    pub fn get(&self, name: &str) -> Option<&[MenuItem]> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.items.as_slice())
    }

    /// Category names in menu order
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// Items of the category called `name`, appending an empty category if needed
    pub fn category_mut(&mut self, name: &str) -> &mut Vec<MenuItem> {
        let index = match self.categories.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                self.categories.push(MenuCategory {
                    name: name.to_string(),
                    items: Vec::new(),
                });
                self.categories.len() - 1
            }
        };
        &mut self.categories[index].items
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}

impl Serialize for MenuRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MenuRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MenuRecordVisitor;

        impl<'de> Visitor<'de> for MenuRecordVisitor {
            type Value = MenuRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping category names to item arrays")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<MenuRecord, A::Error> {
                let mut menu = MenuRecord::default();
                while let Some((name, items)) = access.next_entry::<String, Vec<MenuItem>>()? {
                    menu.category_mut(&name).extend(items);
                }
                Ok(menu)
            }
        }

        deserializer.deserialize_map(MenuRecordVisitor)
    }
}

fn parse_item(category: &str, index: usize, item: Value) -> Result<MenuItem, MenuError> {
    let Value::Object(mut fields) = item else {
        return Err(MenuError::InvalidMenu(format!(
            "item {} in '{}' is not an object",
            index, category
        )));
    };

    let name = match fields.remove("name") {
        Some(Value::String(name)) => name,
        _ => {
            return Err(MenuError::InvalidMenu(format!(
                "item {} in '{}' has no string name",
                index, category
            )));
        }
    };

    let price = match fields.remove("price") {
        Some(Value::String(price)) => Price::Text(price),
        Some(Value::Number(price)) => Price::Number(price),
        _ => {
            return Err(MenuError::InvalidMenu(format!(
                "item '{}' in '{}' has no string or numeric price",
                name, category
            )));
        }
    };

    Ok(MenuItem {
        name,
        price,
        description: take_string(&mut fields, "description"),
    })
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// Removes a ```` ```json ```` fence that chat models like to wrap output in
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    // Drop the info string (e.g. "json") on the opening line
    match rest.split_once('\n') {
        Some((_, body)) => body.trim(),
        None => rest.trim(),
    }
}

/// Everything a full pipeline run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuReport {
    /// Query the run started from
    pub query: String,

    /// Resolved URL that was scraped
    pub url: String,

    /// Flattened page text handed to the interpretation service
    pub raw_text: String,

    /// Validated menu
    pub menu: MenuRecord,
}
