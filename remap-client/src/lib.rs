//! # remap-client
//!
//! Typed client for remap: a map-like API (`insert`, `contains`, `get`,
//! lazy entry handles) over a remote associative store.
//!
//! This crate provides:
//! - Sealed key/value codec traits over a closed set of primitive kinds
//! - [`TypedClient`], generic over key, value, and transport
//! - A lazy [`Entry`] handle that defers the round trip until read/write
//! - The [`Transport`] boundary, with a RESP2 TCP implementation and an
//!   in-memory implementation for tests and embedding
//!
//! The client owns exactly one connection and every operation takes
//! `&mut self`: it is not thread-safe, one client per connection.

pub mod client;
pub mod codec;
pub mod entry;
pub mod error;
pub mod memory;
pub mod resp;
pub mod transport;

pub use client::TypedClient;
pub use codec::{StoreKey, StoreValue};
pub use entry::Entry;
pub use error::ClientError;
pub use memory::MemoryTransport;
pub use resp::{RespConfig, RespTransport};
pub use transport::{Transport, TransportError};
