//! Tagged replies returned by a transport round trip.

use bytes::Bytes;

/// A reply from the backing store.
///
/// Transport-level failure is not a reply variant: connection trouble
/// surfaces as a transport error, and only [`Reply::Nil`] means the key
/// was absent. The two are deliberately kept apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A textual payload (simple or bulk string).
    Text(Bytes),
    /// An integer payload.
    Integer(i64),
    /// Key absent.
    Nil,
}

impl Reply {
    /// Returns the textual payload, if this is a text reply.
    pub fn as_text(&self) -> Option<&[u8]> {
        match self {
            Reply::Text(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an integer reply.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Reply::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Reply::Nil)
    }

    /// Returns the shape name, for error reporting.
    pub const fn shape(&self) -> &'static str {
        match self {
            Reply::Text(_) => "text",
            Reply::Integer(_) => "integer",
            Reply::Nil => "nil",
        }
    }
}
