//! Sealed key/value codec traits over the closed kind set.
//!
//! These traits are the compile-time face of the kind table in
//! `remap-protocol`: each supported primitive carries its kind, its
//! encoder into a typed [`Arg`], and (for values) its decoder from a
//! [`Reply`]. The traits are sealed, so instantiating the client with any
//! unsupported type fails to compile - the type error can never reach
//! runtime.

use remap_protocol::{Arg, Kind, ProtocolError, Reply};

mod sealed {
    pub trait Sealed {}

    impl Sealed for String {}
    impl Sealed for i32 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// A type usable as a key.
pub trait StoreKey: sealed::Sealed {
    /// The kind this key encodes as.
    const KIND: Kind;

    /// Encodes the key as a typed command argument.
    fn encode(&self) -> Arg<'_>;
}

/// A type usable as a value.
///
/// `Default` supplies the zero value written by auto-vivification.
pub trait StoreValue: sealed::Sealed + Default + Sized {
    /// The kind this value encodes as.
    const KIND: Kind;

    /// Encodes the value as a typed command argument.
    fn encode(&self) -> Arg<'_>;

    /// Decodes a textual reply payload into this value.
    fn decode(reply: &Reply) -> Result<Self, ProtocolError>;
}

fn expect_text(reply: &Reply) -> Result<&[u8], ProtocolError> {
    reply.as_text().ok_or(ProtocolError::UnexpectedReply {
        expected: "text",
        actual: reply.shape(),
    })
}

fn payload_str(payload: &[u8]) -> Result<&str, ProtocolError> {
    std::str::from_utf8(payload).map_err(|_| ProtocolError::InvalidUtf8)
}

impl StoreKey for String {
    const KIND: Kind = Kind::Text;

    fn encode(&self) -> Arg<'_> {
        Arg::Text(self.as_bytes())
    }
}

impl StoreKey for i32 {
    const KIND: Kind = Kind::Int32;

    fn encode(&self) -> Arg<'_> {
        Arg::Int32(*self)
    }
}

impl StoreKey for f32 {
    const KIND: Kind = Kind::Float32;

    fn encode(&self) -> Arg<'_> {
        Arg::Float32(*self)
    }
}

impl StoreKey for f64 {
    const KIND: Kind = Kind::Float64;

    fn encode(&self) -> Arg<'_> {
        Arg::Float64(*self)
    }
}

impl StoreValue for String {
    const KIND: Kind = Kind::Text;

    fn encode(&self) -> Arg<'_> {
        Arg::Text(self.as_bytes())
    }

    // Payloads are length-delimited, so embedded NUL bytes survive intact.
    fn decode(reply: &Reply) -> Result<Self, ProtocolError> {
        let payload = expect_text(reply)?;
        Ok(payload_str(payload)?.to_owned())
    }
}

impl StoreValue for i32 {
    const KIND: Kind = Kind::Int32;

    fn encode(&self) -> Arg<'_> {
        Arg::Int32(*self)
    }

    fn decode(reply: &Reply) -> Result<Self, ProtocolError> {
        let payload = expect_text(reply)?;
        let text = payload_str(payload)?;
        text.parse()
            .map_err(|_| ProtocolError::ParseInt(text.to_owned()))
    }
}

impl StoreValue for f32 {
    const KIND: Kind = Kind::Float32;

    fn encode(&self) -> Arg<'_> {
        Arg::Float32(*self)
    }

    fn decode(reply: &Reply) -> Result<Self, ProtocolError> {
        let payload = expect_text(reply)?;
        let text = payload_str(payload)?;
        text.parse()
            .map_err(|_| ProtocolError::ParseFloat(text.to_owned()))
    }
}

impl StoreValue for f64 {
    const KIND: Kind = Kind::Float64;

    fn encode(&self) -> Arg<'_> {
        Arg::Float64(*self)
    }

    fn decode(reply: &Reply) -> Result<Self, ProtocolError> {
        let payload = expect_text(reply)?;
        let text = payload_str(payload)?;
        text.parse()
            .map_err(|_| ProtocolError::ParseFloat(text.to_owned()))
    }
}
