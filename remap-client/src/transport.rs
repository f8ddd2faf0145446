//! The transport boundary.

use async_trait::async_trait;
use remap_protocol::{Command, Reply};
use thiserror::Error;

/// Errors raised by a transport.
///
/// These are kept apart from "key not found" ([`Reply::Nil`]): only a nil
/// reply feeds the client's read-or-create path, while transport trouble
/// always surfaces to the caller.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timeout")]
    RequestTimeout,

    #[error("connection closed")]
    ConnectionClosed,

    #[error("malformed reply: {0}")]
    Protocol(String),

    #[error("server error: {0}")]
    Server(String),
}

impl TransportError {
    /// Returns whether retrying the round trip could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TransportError::Io(_)
                | TransportError::RequestTimeout
                | TransportError::ConnectionClosed
        )
    }
}

/// Executes commands against a remote associative store.
///
/// A transport owns one connection. `execute` performs exactly one
/// blocking round trip: render the command, send it, read one reply.
#[async_trait]
pub trait Transport: Send {
    async fn execute(&mut self, command: Command<'_>) -> Result<Reply, TransportError>;
}
