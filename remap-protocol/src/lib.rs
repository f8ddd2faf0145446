//! # remap-protocol
//!
//! Command and reply model for remap, a typed client adapter for
//! Redis-style remote associative stores.
//!
//! This crate provides:
//! - The closed set of supported primitive kinds and their format tokens
//! - Typed command arguments and per-call command values
//! - Tagged reply types returned by a transport
//! - Protocol-level decode errors
//!
//! No I/O lives here; rendering commands to wire bytes and parsing wire
//! bytes into [`Reply`] values is the job of a transport implementation.

pub mod command;
pub mod error;
pub mod kind;
pub mod reply;

pub use command::{Arg, Command, Verb};
pub use error::ProtocolError;
pub use kind::Kind;
pub use reply::Reply;

/// Default port of the backing store.
pub const DEFAULT_PORT: u16 = 6379;
