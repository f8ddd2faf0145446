//! Lazy entry handles.

use crate::client::TypedClient;
use crate::codec::{StoreKey, StoreValue};
use crate::error::ClientError;
use crate::transport::Transport;

/// A deferred read/write handle bound to one (client, key) pair.
///
/// The handle owns no data and holds a mutable borrow of its client, so
/// it cannot outlive it and no round trip happens until it is consumed.
/// Reading materializes the value with read-or-create semantics (a miss
/// vivifies the value kind's default); writing delegates to
/// [`TypedClient::insert`].
pub struct Entry<'c, K, V, T> {
    client: &'c mut TypedClient<K, V, T>,
    key: K,
}

impl<'c, K, V, T> Entry<'c, K, V, T>
where
    K: StoreKey,
    V: StoreValue,
    T: Transport,
{
    pub(crate) fn new(client: &'c mut TypedClient<K, V, T>, key: K) -> Self {
        Self { client, key }
    }

    /// Returns the key this handle is bound to.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Materializes the value, vivifying the default on a miss.
    ///
    /// Equivalent to `client.get_or_insert_default(&key)`: same result,
    /// same round trips.
    pub async fn read(self) -> Result<V, ClientError> {
        self.client.get_or_insert_default(&self.key).await
    }

    /// Writes a value under the bound key.
    ///
    /// Equivalent to `client.insert(&key, value)`.
    pub async fn write(self, value: &V) -> Result<(), ClientError> {
        self.client.insert(&self.key, value).await
    }

    /// Materializes the value and compares it to `other`.
    pub async fn eq_value(self, other: &V) -> Result<bool, ClientError>
    where
        V: PartialEq,
    {
        Ok(self.read().await? == *other)
    }
}
