mod category;
mod item;
mod language;
mod menu;

pub use category::{slugify, Category};
pub use item::Item;
pub use language::{Language, LocalizedText};
pub use menu::{MenuDocument, Violation};
