//! File-backed menu storage with revision checks.
//!
//! The document lives in a single JSON file. Every successful write bumps
//! a counter and derives a new revision from it and the written bytes; a
//! write based on any other revision is rejected.

use menuboard_core::{MenuDocument, Revision};
use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Content written when the document file does not exist yet.
const EMPTY_MENU: &str = "{\n  \"categories\": []\n}";

/// Errors that can occur during storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error reading or writing the document file.
    IoError(PathBuf, io::Error),
    /// Written content is not a menu document.
    InvalidDocument(String),
    /// The write was based on an outdated revision.
    Conflict { expected: Revision },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::IoError(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
            StorageError::InvalidDocument(e) => {
                write!(f, "Invalid menu document: {}", e)
            }
            StorageError::Conflict { expected } => {
                write!(f, "Revision mismatch, current revision is {}", expected)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(_, e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Stored {
    content: Vec<u8>,
    revision: Revision,
    generation: u64,
}

/// The stored document and its current revision.
#[derive(Debug)]
pub struct MenuStorage {
    path: PathBuf,
    stored: Mutex<Stored>,
}

impl MenuStorage {
    /// Opens the document file, creating an empty menu if it is missing.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let content = match tokio::fs::read(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|e| StorageError::IoError(parent.to_path_buf(), e))?;
                }
                tokio::fs::write(&path, EMPTY_MENU)
                    .await
                    .map_err(|e| StorageError::IoError(path.clone(), e))?;
                tracing::info!("Created empty menu at {}", path.display());
                EMPTY_MENU.as_bytes().to_vec()
            }
            Err(e) => return Err(StorageError::IoError(path, e)),
        };

        let revision = Revision::derive(0, &content);
        Ok(Self {
            path,
            stored: Mutex::new(Stored {
                content,
                revision,
                generation: 0,
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current content and revision.
    pub async fn snapshot(&self) -> (Vec<u8>, Revision) {
        let stored = self.stored.lock().await;
        (stored.content.clone(), stored.revision.clone())
    }

    /// Replaces the document if `base` is the current revision.
    pub async fn write(&self, content: Vec<u8>, base: &Revision) -> Result<Revision, StorageError> {
        let text = std::str::from_utf8(&content)
            .map_err(|e| StorageError::InvalidDocument(e.to_string()))?;
        MenuDocument::from_json(text).map_err(|e| StorageError::InvalidDocument(e.to_string()))?;

        let mut stored = self.stored.lock().await;
        if &stored.revision != base {
            return Err(StorageError::Conflict {
                expected: stored.revision.clone(),
            });
        }

        tokio::fs::write(&self.path, &content)
            .await
            .map_err(|e| StorageError::IoError(self.path.clone(), e))?;

        stored.generation += 1;
        stored.revision = Revision::derive(stored.generation, &content);
        stored.content = content;
        tracing::info!("Stored menu revision {}", stored.revision);
        Ok(stored.revision.clone())
    }
}
