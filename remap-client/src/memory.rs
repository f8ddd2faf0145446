//! In-memory transport.
//!
//! A HashMap-backed fake store for tests and embedded use. Entries hold
//! the rendered text of each argument, which is exactly what a
//! text-protocol store observes, so the typed client behaves identically
//! over this transport and over RESP.

use crate::transport::{Transport, TransportError};
use async_trait::async_trait;
use bytes::Bytes;
use remap_protocol::{Command, Reply, Verb};
use std::collections::HashMap;

/// An in-memory [`Transport`].
#[derive(Debug, Default)]
pub struct MemoryTransport {
    entries: HashMap<Vec<u8>, Vec<u8>>,
    ops: Vec<Verb>,
    fail_next: Option<TransportError>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Log of executed verbs, in order. Lets tests count round trips.
    pub fn ops(&self) -> &[Verb] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Makes the next `execute` call fail with `err` instead of running.
    pub fn fail_next(&mut self, err: TransportError) {
        self.fail_next = Some(err);
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn execute(&mut self, command: Command<'_>) -> Result<Reply, TransportError> {
        if let Some(err) = self.fail_next.take() {
            return Err(err);
        }

        self.ops.push(command.verb());
        let key = command.key().render().into_owned();

        match command.verb() {
            Verb::Set => {
                let value = command
                    .value()
                    .ok_or_else(|| TransportError::Protocol("SET without value".to_string()))?
                    .render()
                    .into_owned();
                self.entries.insert(key, value);
                Ok(Reply::Text(Bytes::from_static(b"OK")))
            }
            Verb::Get => Ok(match self.entries.get(&key) {
                Some(value) => Reply::Text(Bytes::copy_from_slice(value)),
                None => Reply::Nil,
            }),
            Verb::Exists => Ok(Reply::Integer(i64::from(self.entries.contains_key(&key)))),
        }
    }
}
