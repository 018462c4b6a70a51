use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::category::Category;

/// The whole menu. Array order is display order; there is no sort key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDocument {
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// A broken document invariant found by [`MenuDocument::violations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    DuplicateCategoryId(String),
    MissingCategoryName(String),
    MissingItemName { category_id: String, index: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DuplicateCategoryId(id) => write!(f, "Duplicate category id: {}", id),
            Violation::MissingCategoryName(id) => {
                write!(f, "Category '{}' has no German name", id)
            }
            Violation::MissingItemName { category_id, index } => write!(
                f,
                "Item {} in category '{}' has no German name",
                index, category_id
            ),
        }
    }
}

impl MenuDocument {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Pretty JSON with two-space indentation, the on-disk format.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn category_mut(&mut self, id: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.categories.iter().any(|c| c.id == id)
    }

    /// Returns `base` if unused, otherwise the first free `base-N` (N >= 2).
    pub fn unique_id(&self, base: &str) -> String {
        if !self.contains_id(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{}-{}", base, n))
            .find(|candidate| !self.contains_id(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    /// Checks the document invariants: unique category ids and a German
    /// name on every category and item.
    pub fn violations(&self) -> Vec<Violation> {
        let mut seen = HashSet::new();
        let mut violations = Vec::new();

        for category in &self.categories {
            if !seen.insert(category.id.as_str()) {
                violations.push(Violation::DuplicateCategoryId(category.id.clone()));
            }
            if category.name.de.trim().is_empty() {
                violations.push(Violation::MissingCategoryName(category.id.clone()));
            }
            for (index, item) in category.items.iter().enumerate() {
                if item.name.de.trim().is_empty() {
                    violations.push(Violation::MissingItemName {
                        category_id: category.id.clone(),
                        index,
                    });
                }
            }
        }

        violations
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }
}
