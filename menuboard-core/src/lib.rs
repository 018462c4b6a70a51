//! Menuboard Core Library
//!
//! Menu document model, storage access, the admin editor and the public
//! menu renderer shared by the Menuboard applications.

pub mod editor;
pub mod gateway;
pub mod models;
pub mod render;
pub mod settings;
pub mod source;
pub mod state;

pub use editor::{
    CategoryForm, Confirm, Deletion, Editor, EditorError, ItemForm, LoginOutcome, Mode, Notice,
    NoticeLevel, SaveOutcome,
};
pub use gateway::{
    Credential, GatewayError, HttpGateway, MemoryGateway, Revision, Snapshot, StorageGateway,
};
pub use models::{slugify, Category, Item, Language, LocalizedText, MenuDocument, Violation};
pub use render::{render, LoadState, MenuView, Renderer, RendererOptions};
pub use settings::{Settings, Theme};
pub use source::{DocumentSource, SourceError};
pub use state::{FileStateStore, MemoryStateStore, StateError, StateStore};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
