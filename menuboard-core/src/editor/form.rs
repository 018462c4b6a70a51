//! Input forms for categories and items.

use super::error::EditorError;
use crate::models::{Category, Item, LocalizedText};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: LocalizedText,
}

impl CategoryForm {
    pub fn new(name: LocalizedText) -> Self {
        Self { name }
    }

    /// Prefills the form from an existing category.
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
        }
    }

    /// Trimmed name map; fails without a German name.
    pub fn validated_name(&self) -> Result<LocalizedText, EditorError> {
        let name = self.name.trimmed();
        if name.de.is_empty() {
            return Err(EditorError::MissingFallbackName);
        }
        Ok(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemForm {
    pub name: LocalizedText,
    pub desc: LocalizedText,
    pub price: String,
    pub sold_out: bool,
}

impl ItemForm {
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            desc: item.desc.clone().unwrap_or_default(),
            price: item.price.clone(),
            sold_out: item.is_sold_out,
        }
    }

    /// Builds the item with every field trimmed. A description that is
    /// empty in every language is dropped.
    pub fn into_item(self) -> Result<Item, EditorError> {
        let name = self.name.trimmed();
        if name.de.is_empty() {
            return Err(EditorError::MissingFallbackName);
        }
        let desc = self.desc.trimmed();

        Ok(Item {
            name,
            desc: (!desc.is_empty()).then_some(desc),
            price: self.price.trim().to_string(),
            is_sold_out: self.sold_out,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Language;

    #[test]
    fn test_item_form_trims_everything() {
        let form = ItemForm {
            name: LocalizedText::new("  Tom Kha ").with(Language::En, " Tom Kha soup"),
            desc: LocalizedText::new(" Kokos ").with(Language::Tr, "   "),
            price: " 8,50 ".into(),
            sold_out: false,
        };
        let item = form.into_item().unwrap();
        assert_eq!(item.name.de, "Tom Kha");
        assert_eq!(item.name.en, "Tom Kha soup");
        assert_eq!(item.price, "8,50");
        let desc = item.desc.unwrap();
        assert_eq!(desc.de, "Kokos");
        assert_eq!(desc.tr, "");
    }

    #[test]
    fn test_item_form_blank_description_dropped() {
        let form = ItemForm {
            name: LocalizedText::new("Pho"),
            desc: LocalizedText::new("  "),
            price: "9".into(),
            sold_out: true,
        };
        let item = form.into_item().unwrap();
        assert!(item.desc.is_none());
        assert!(item.is_sold_out);
    }

    #[test]
    fn test_item_form_requires_german_name() {
        let form = ItemForm {
            name: LocalizedText::new("   ").with(Language::En, "Pho"),
            ..ItemForm::default()
        };
        assert_eq!(form.into_item(), Err(EditorError::MissingFallbackName));
    }

    #[test]
    fn test_item_form_prefill_roundtrip() {
        let item = Item::new(LocalizedText::new("Pho"), "9")
            .with_desc(LocalizedText::new("Suppe"))
            .sold_out();
        assert_eq!(ItemForm::from_item(&item).into_item().unwrap(), item);
    }

    #[test]
    fn test_category_form_validation() {
        let form = CategoryForm::new(LocalizedText::new(" Suppen ").with(Language::En, " Soups"));
        let name = form.validated_name().unwrap();
        assert_eq!(name.de, "Suppen");
        assert_eq!(name.en, "Soups");

        let empty = CategoryForm::new(LocalizedText::default());
        assert_eq!(empty.validated_name(), Err(EditorError::MissingFallbackName));
    }
}
