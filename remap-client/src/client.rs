//! High-level typed client API.

use crate::codec::{StoreKey, StoreValue};
use crate::entry::Entry;
use crate::error::ClientError;
use crate::transport::Transport;
use remap_protocol::{Command, Reply};
use std::marker::PhantomData;

/// A map-like, compile-time-typed client for a remote associative store.
///
/// `TypedClient` is parameterized over a key type, a value type, and a
/// transport. Key and value must belong to the closed kind set (see
/// [`StoreKey`]/[`StoreValue`]); anything else fails to compile.
///
/// The client owns exactly one transport for its entire lifetime, and
/// every operation takes `&mut self`, so the single connection is used
/// exclusively. The type is not thread-safe: one client per connection,
/// wrap it yourself if you need sharing.
pub struct TypedClient<K, V, T> {
    transport: T,
    _marker: PhantomData<fn(K, V)>,
}

impl<K, V, T> TypedClient<K, V, T>
where
    K: StoreKey,
    V: StoreValue,
    T: Transport,
{
    /// Creates a client over an already-connected transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            _marker: PhantomData,
        }
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the underlying transport mutably.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consumes the client, returning the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    async fn execute(&mut self, command: Command<'_>) -> Result<Reply, ClientError> {
        tracing::debug!(template = %command.template(), "round trip");
        Ok(self.transport.execute(command).await?)
    }

    /// Writes a value under a key (one SET round trip).
    ///
    /// Failures surface: a broken connection or a store-side error is
    /// returned to the caller, never swallowed.
    pub async fn insert(&mut self, key: &K, value: &V) -> Result<(), ClientError> {
        self.execute(Command::set(key.encode(), StoreValue::encode(value)))
            .await?;
        Ok(())
    }

    /// Returns whether a key exists (one EXISTS round trip).
    ///
    /// A reply of the wrong shape is a checked error in every build, and
    /// transport failure surfaces instead of degrading to `false`.
    pub async fn contains(&mut self, key: &K) -> Result<bool, ClientError> {
        let reply = self.execute(Command::exists(key.encode())).await?;
        match reply {
            Reply::Integer(n) => Ok(n != 0),
            other => Err(remap_protocol::ProtocolError::UnexpectedReply {
                expected: "integer",
                actual: other.shape(),
            }
            .into()),
        }
    }

    /// Reads the value under a key (one GET round trip).
    ///
    /// A missing key is [`ClientError::NotFound`]; this call never writes.
    /// Use [`get_or_insert_default`](Self::get_or_insert_default) for
    /// read-or-create semantics.
    pub async fn get(&mut self, key: &K) -> Result<V, ClientError> {
        match self.execute(Command::get(key.encode())).await? {
            Reply::Nil => Err(ClientError::NotFound),
            reply => Ok(V::decode(&reply)?),
        }
    }

    /// Reads the value under a key, writing the value kind's default first
    /// if the key is missing.
    ///
    /// On a miss this issues SET then retries the read exactly once (three
    /// round trips total); if the key is still absent after the write, the
    /// terminal outcome is [`ClientError::NotFound`]. The check-write-read
    /// window is not atomic: a concurrent writer to the same key between
    /// steps can race.
    pub async fn get_or_insert_default(&mut self, key: &K) -> Result<V, ClientError> {
        match self.execute(Command::get(key.encode())).await? {
            Reply::Nil => {}
            reply => return Ok(V::decode(&reply)?),
        }

        tracing::debug!("key missing, inserting default and retrying read");
        self.insert(key, &V::default()).await?;

        match self.execute(Command::get(key.encode())).await? {
            Reply::Nil => Err(ClientError::NotFound),
            reply => Ok(V::decode(&reply)?),
        }
    }

    /// Returns a lazy handle for a key.
    ///
    /// No round trip happens until the handle is read or written.
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, T> {
        Entry::new(self, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryTransport;
    use crate::transport::TransportError;
    use remap_protocol::Verb;

    fn client<V: StoreValue>() -> TypedClient<String, V, MemoryTransport> {
        TypedClient::new(MemoryTransport::new())
    }

    #[tokio::test]
    async fn test_insert_then_get_round_trip() {
        let mut c = client::<String>();
        let key = "a".to_string();
        c.insert(&key, &"1".to_string()).await.unwrap();
        assert_eq!(c.get(&key).await.unwrap(), "1");
    }

    #[tokio::test]
    async fn test_insert_then_get_numeric_kinds() {
        let mut ints = client::<i32>();
        let key = "n".to_string();
        ints.insert(&key, &-42).await.unwrap();
        assert_eq!(ints.get(&key).await.unwrap(), -42);

        let mut floats = client::<f64>();
        floats.insert(&key, &0.3).await.unwrap();
        assert_eq!(floats.get(&key).await.unwrap(), 0.3);
    }

    #[tokio::test]
    async fn test_numeric_keys() {
        let mut c: TypedClient<i32, String, MemoryTransport> =
            TypedClient::new(MemoryTransport::new());
        c.insert(&7, &"seven".to_string()).await.unwrap();
        assert!(c.contains(&7).await.unwrap());
        assert_eq!(c.get(&7).await.unwrap(), "seven");
    }

    #[tokio::test]
    async fn test_contains() {
        let mut c = client::<String>();
        let key = "a".to_string();
        assert!(!c.contains(&key).await.unwrap());
        c.insert(&key, &"1".to_string()).await.unwrap();
        assert!(c.contains(&key).await.unwrap());
        assert!(!c.contains(&"never-set".to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_missing_key_is_not_found_and_does_not_write() {
        let mut c = client::<i32>();
        let key = "missing".to_string();
        assert!(matches!(c.get(&key).await, Err(ClientError::NotFound)));
        assert!(!c.contains(&key).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_or_insert_default_vivifies() {
        let mut c = client::<i32>();
        let key = "never-set".to_string();
        assert!(!c.contains(&key).await.unwrap());

        let value = c.get_or_insert_default(&key).await.unwrap();
        assert_eq!(value, 0);
        assert!(c.contains(&key).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_or_insert_default_round_trip_counts() {
        let mut c = client::<i32>();
        let key = "k".to_string();

        // Miss: GET, SET, GET.
        c.get_or_insert_default(&key).await.unwrap();
        assert_eq!(
            c.transport().ops(),
            &[Verb::Get, Verb::Set, Verb::Get]
        );

        // Hit: one GET.
        c.transport_mut().clear_ops();
        c.get_or_insert_default(&key).await.unwrap();
        assert_eq!(c.transport().ops(), &[Verb::Get]);
    }

    #[tokio::test]
    async fn test_get_or_insert_default_keeps_existing_value() {
        let mut c = client::<i32>();
        let key = "k".to_string();
        c.insert(&key, &9).await.unwrap();
        assert_eq!(c.get_or_insert_default(&key).await.unwrap(), 9);
    }

    #[tokio::test]
    async fn test_insert_surfaces_transport_failure() {
        let mut c = client::<String>();
        c.transport_mut()
            .fail_next(TransportError::ConnectionClosed);
        let result = c.insert(&"a".to_string(), &"1".to_string()).await;
        assert!(matches!(
            result,
            Err(ClientError::Transport(TransportError::ConnectionClosed))
        ));
    }

    #[tokio::test]
    async fn test_contains_surfaces_transport_failure() {
        let mut c = client::<String>();
        c.transport_mut()
            .fail_next(TransportError::RequestTimeout);
        let result = c.contains(&"a".to_string()).await;
        assert!(matches!(
            result,
            Err(ClientError::Transport(TransportError::RequestTimeout))
        ));
    }

    #[tokio::test]
    async fn test_get_surfaces_transport_failure_without_vivifying() {
        let mut c = client::<i32>();
        c.transport_mut()
            .fail_next(TransportError::ConnectionClosed);
        assert!(matches!(
            c.get_or_insert_default(&"k".to_string()).await,
            Err(ClientError::Transport(_))
        ));
        // Connection trouble must not be mistaken for a miss.
        assert!(!c.contains(&"k".to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_decode_failure_is_parse_error() {
        let mut strings = client::<String>();
        let key = "k".to_string();
        strings.insert(&key, &"abc".to_string()).await.unwrap();

        let mut ints: TypedClient<String, i32, MemoryTransport> =
            TypedClient::new(strings.into_transport());
        let result = ints.get(&key).await;
        assert!(matches!(
            result,
            Err(ClientError::Protocol(
                remap_protocol::ProtocolError::ParseInt(_)
            ))
        ));
    }

    #[tokio::test]
    async fn test_spec_scenario_text() {
        let mut c = client::<String>();
        let key = "a".to_string();
        c.insert(&key, &"1".to_string()).await.unwrap();
        assert!(c.contains(&key).await.unwrap());
        assert_eq!(c.get(&key).await.unwrap(), "1");
        assert!(c.entry(key).eq_value(&"1".to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn test_spec_scenario_vivification() {
        let mut c = client::<i32>();
        let key = "never-set".to_string();
        assert!(!c.contains(&key).await.unwrap());
        assert_eq!(c.get_or_insert_default(&key).await.unwrap(), 0);
        assert!(c.contains(&key).await.unwrap());
    }
}
