use serde::{Deserialize, Serialize};

use super::item::Item;
use super::language::LocalizedText;

/// A menu section. `id` doubles as the navigation anchor on the public page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: LocalizedText,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: LocalizedText) -> Self {
        Self {
            id: id.into(),
            name,
            hidden: false,
            items: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Items still on offer, in menu order.
    pub fn available_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| !item.is_sold_out)
    }

    /// Whether the public menu shows this category at all.
    pub fn is_publicly_visible(&self) -> bool {
        !self.hidden && self.available_items().next().is_some()
    }
}

/// Derives a URL-fragment-safe id from a display name.
///
/// Lowercases, collapses every run of characters outside `a-z0-9` into a
/// single `-` and trims separators from both ends.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    slug
}
