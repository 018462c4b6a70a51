//! Access to the remote menu store.
//!
//! The store is an opaque read/write API: a read returns the document and
//! a revision token, a write sends the whole document together with the
//! revision it was based on and is rejected when that revision is stale.

mod codec;
mod error;
mod http;
mod memory;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::future::Future;

use crate::models::MenuDocument;

pub use codec::{decode_document, encode_document};
pub use error::GatewayError;
pub use http::{HttpGateway, PASSWORD_HEADER};
pub use memory::MemoryGateway;

/// Opaque version marker of the stored document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(String);

impl Revision {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Derives a revision from a write counter and the stored bytes.
    ///
    /// Mixing in the counter makes every write produce a new revision,
    /// even when the content did not change.
    pub fn derive(generation: u64, content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(generation.to_be_bytes());
        hasher.update(b":");
        hasher.update(content);
        Self(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Admin password attached to every gateway call.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(***)")
    }
}

/// Result of a successful read.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub document: MenuDocument,
    pub revision: Revision,
}

/// Read/write access to the stored menu document.
pub trait StorageGateway {
    /// Fetches the current document and its revision.
    fn read(
        &self,
        credential: &Credential,
    ) -> impl Future<Output = Result<Snapshot, GatewayError>> + Send;

    /// Stores `document` if the stored revision still equals `expected`.
    /// Returns the revision of the newly stored document.
    fn write(
        &self,
        credential: &Credential,
        document: &MenuDocument,
        expected: &Revision,
    ) -> impl Future<Output = Result<Revision, GatewayError>> + Send;
}
