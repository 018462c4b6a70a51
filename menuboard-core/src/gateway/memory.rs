//! In-process storage gateway.
//!
//! Keeps the encoded document in memory and enforces the same revision
//! check as the remote store. Useful for local sessions and tests.

use std::sync::{Arc, Mutex};

use super::codec::{decode_document, encode_document};
use super::{Credential, GatewayError, Revision, Snapshot, StorageGateway};
use crate::models::MenuDocument;

#[derive(Debug)]
struct Stored {
    content: String,
    revision: Revision,
    generation: u64,
    outage: Option<GatewayError>,
    writes: usize,
}

/// Gateway backed by memory, cloneable so tests can keep a handle.
#[derive(Debug, Clone)]
pub struct MemoryGateway {
    password: Credential,
    stored: Arc<Mutex<Stored>>,
}

impl MemoryGateway {
    pub fn new(password: impl Into<String>, document: &MenuDocument) -> Result<Self, GatewayError> {
        let content = encode_document(document)?;
        let revision = Revision::derive(0, content.as_bytes());
        Ok(Self {
            password: Credential::new(password),
            stored: Arc::new(Mutex::new(Stored {
                content,
                revision,
                generation: 0,
                outage: None,
                writes: 0,
            })),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Stored>, GatewayError> {
        self.stored
            .lock()
            .map_err(|_| GatewayError::transport("Store lock poisoned"))
    }

    /// Makes every following call fail with `error` until cleared.
    pub fn set_outage(&self, error: Option<GatewayError>) {
        if let Ok(mut stored) = self.lock() {
            stored.outage = error;
        }
    }

    /// Replaces the stored document as another editor would.
    pub fn replace(&self, document: &MenuDocument) -> Result<Revision, GatewayError> {
        let mut stored = self.lock()?;
        Self::commit(&mut stored, encode_document(document)?);
        Ok(stored.revision.clone())
    }

    pub fn revision(&self) -> Option<Revision> {
        self.lock().ok().map(|s| s.revision.clone())
    }

    /// Number of accepted writes.
    pub fn write_count(&self) -> usize {
        self.lock().map(|s| s.writes).unwrap_or(0)
    }

    fn commit(stored: &mut Stored, content: String) {
        stored.generation += 1;
        stored.revision = Revision::derive(stored.generation, content.as_bytes());
        stored.content = content;
        stored.writes += 1;
    }

    fn check(&self, stored: &Stored, credential: &Credential) -> Result<(), GatewayError> {
        if let Some(error) = &stored.outage {
            return Err(error.clone());
        }
        if credential != &self.password {
            return Err(GatewayError::Auth);
        }
        Ok(())
    }
}

impl StorageGateway for MemoryGateway {
    async fn read(&self, credential: &Credential) -> Result<Snapshot, GatewayError> {
        let stored = self.lock()?;
        self.check(&stored, credential)?;
        Ok(Snapshot {
            document: decode_document(&stored.content)?,
            revision: stored.revision.clone(),
        })
    }

    async fn write(
        &self,
        credential: &Credential,
        document: &MenuDocument,
        expected: &Revision,
    ) -> Result<Revision, GatewayError> {
        let content = encode_document(document)?;
        let mut stored = self.lock()?;
        self.check(&stored, credential)?;
        if &stored.revision != expected {
            return Err(GatewayError::Conflict);
        }
        Self::commit(&mut stored, content);
        Ok(stored.revision.clone())
    }
}
