use thiserror::Error;

use crate::gateway::GatewayError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Not logged in")]
    NotAuthenticated,

    #[error("No storage proxy configured: local mode, changes cannot be saved")]
    LocalMode,

    #[error("A save is already in progress")]
    SaveInProgress,

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Category '{category_id}' has no item {index} (it has {len})")]
    ItemIndexOutOfRange {
        category_id: String,
        index: usize,
        len: usize,
    },

    #[error("A German name is required")]
    MissingFallbackName,

    #[error("Wrong password")]
    WrongPassword,

    #[error("Storage proxy unreachable ({remote}) and no local menu found ({local})")]
    Unavailable { remote: GatewayError, local: String },

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
