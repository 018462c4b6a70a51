use serde::Serialize;

use crate::models::{Category, Item, Language, MenuDocument};

/// Text shown instead of the menu when it could not be fetched.
pub const LOAD_FAILED_MESSAGE: &str = "The menu could not be loaded.";

/// A link in one of the navigation lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    /// `#<category id>`
    pub href: String,
    pub label: String,
    pub active: bool,
}

impl NavEntry {
    fn for_category(category: &Category, language: Language) -> Self {
        Self {
            href: format!("#{}", category.id),
            label: category.name.text(language).to_string(),
            active: false,
        }
    }

    pub fn target(&self) -> &str {
        self.href.trim_start_matches('#')
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub name: String,
    pub price: String,
    pub description: Option<String>,
}

impl ItemView {
    fn for_item(item: &Item, language: Language) -> Self {
        Self {
            name: item.name.text(language).to_string(),
            price: item.price.clone(),
            description: item.description(language).map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    pub id: String,
    pub title: String,
    pub items: Vec<ItemView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    pub language: Language,
    pub selected: bool,
}

/// Everything the public page shows, independent of any UI toolkit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuView {
    pub language: Language,
    pub languages: Vec<LanguageOption>,
    pub primary_nav: Vec<NavEntry>,
    pub mobile_nav: Vec<NavEntry>,
    pub sections: Vec<SectionView>,
    /// Set when the menu could not be loaded.
    pub message: Option<String>,
}

impl MenuView {
    /// An empty view, used before the document is loaded.
    pub fn empty(language: Language, offered: &[Language]) -> Self {
        Self {
            language,
            languages: language_options(language, offered),
            primary_nav: Vec::new(),
            mobile_nav: Vec::new(),
            sections: Vec::new(),
            message: None,
        }
    }

    pub fn failed(language: Language, offered: &[Language]) -> Self {
        Self {
            message: Some(LOAD_FAILED_MESSAGE.to_string()),
            ..Self::empty(language, offered)
        }
    }

    pub fn section_ids(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.id.clone()).collect()
    }

    /// Marks the entry pointing at `section_id` active in both navigation
    /// lists and clears every other entry.
    pub fn set_active(&mut self, section_id: &str) {
        for entry in self.primary_nav.iter_mut().chain(self.mobile_nav.iter_mut()) {
            entry.active = entry.target() == section_id;
        }
    }

    pub fn active_section(&self) -> Option<&str> {
        self.primary_nav
            .iter()
            .find(|entry| entry.active)
            .map(|entry| entry.target())
    }
}

fn language_options(selected: Language, offered: &[Language]) -> Vec<LanguageOption> {
    offered
        .iter()
        .map(|language| LanguageOption {
            language: *language,
            selected: *language == selected,
        })
        .collect()
}

/// Builds the public view of `document` in `language`.
///
/// Hidden categories and sold-out items are left out, and so is every
/// category that has no item left after that. Document order is kept.
pub fn render(document: &MenuDocument, language: Language, offered: &[Language]) -> MenuView {
    let mut view = MenuView::empty(language, offered);

    for category in document.categories.iter().filter(|c| c.is_publicly_visible()) {
        let entry = NavEntry::for_category(category, language);
        view.primary_nav.push(entry.clone());
        view.mobile_nav.push(entry);

        view.sections.push(SectionView {
            id: category.id.clone(),
            title: category.name.text(language).to_string(),
            items: category
                .available_items()
                .map(|item| ItemView::for_item(item, language))
                .collect(),
        });
    }

    view
}
