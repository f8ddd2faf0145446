//! Client error types.

use crate::transport::TransportError;
use remap_protocol::ProtocolError;
use thiserror::Error;

/// Errors surfaced by [`TypedClient`](crate::TypedClient) operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The key is absent from the store.
    #[error("key not found")]
    NotFound,

    /// The round trip failed at the transport.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The reply could not be decoded into the requested value kind.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl ClientError {
    /// Returns whether retrying the operation could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(err) => err.is_retryable(),
            _ => false,
        }
    }
}
