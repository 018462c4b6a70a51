//! Storage gateway error types.

use thiserror::Error;

/// Errors returned by a [`StorageGateway`](super::StorageGateway).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The store rejected the credential.
    #[error("Wrong password")]
    Auth,

    /// The revision sent with a write is no longer the stored one.
    #[error("The menu was changed elsewhere since it was loaded")]
    Conflict,

    /// Network failure, unexpected status or malformed payload.
    #[error("{0}")]
    Transport(String),
}

impl GatewayError {
    pub fn transport(message: impl Into<String>) -> Self {
        GatewayError::Transport(message.into())
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, GatewayError::Auth)
    }
}
