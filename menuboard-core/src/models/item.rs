use serde::{Deserialize, Serialize};
use std::fmt;

use super::language::{Language, LocalizedText};

/// A single dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<LocalizedText>,
    /// Kept exactly as typed ("12,50"), never parsed.
    #[serde(default)]
    pub price: String,
    #[serde(rename = "isSoldOut", default)]
    pub is_sold_out: bool,
}

impl Item {
    pub fn new(name: LocalizedText, price: impl Into<String>) -> Self {
        Self {
            name,
            desc: None,
            price: price.into(),
            is_sold_out: false,
        }
    }

    pub fn with_desc(mut self, desc: LocalizedText) -> Self {
        self.desc = Some(desc);
        self
    }

    pub fn sold_out(mut self) -> Self {
        self.is_sold_out = true;
        self
    }

    /// Description for `language` with German fallback. `None` when there
    /// is nothing to show.
    pub fn description(&self, language: Language) -> Option<&str> {
        self.desc
            .as_ref()
            .map(|d| d.text(language))
            .filter(|d| !d.is_empty())
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} — {}", self.name.text(Language::FALLBACK), self.price)?;
        if self.is_sold_out {
            write!(f, " [sold out]")?;
        }
        Ok(())
    }
}
