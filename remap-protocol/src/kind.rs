//! The closed set of primitive kinds the client can store.

use std::fmt;

/// Primitive kinds supported as keys and values.
///
/// This enumeration is closed on purpose: the codec traits in
/// `remap-client` are sealed over exactly these kinds, so using any other
/// type with the client is a compile error rather than a runtime surprise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// UTF-8 text.
    Text,
    /// 32-bit signed integer.
    Int32,
    /// Single-precision float.
    Float32,
    /// Double-precision float.
    Float64,
}

impl Kind {
    /// Returns the format token used when building a command template for
    /// an argument of this kind.
    ///
    /// `Float32` and `Float64` share the float token; rendering uses the
    /// shortest round-trip form, so sharing the token costs no precision.
    pub const fn token(self) -> &'static str {
        match self {
            Kind::Text => "%s",
            Kind::Int32 => "%d",
            Kind::Float32 | Kind::Float64 => "%f",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Text => write!(f, "text"),
            Kind::Int32 => write!(f, "int32"),
            Kind::Float32 => write!(f, "float32"),
            Kind::Float64 => write!(f, "float64"),
        }
    }
}
