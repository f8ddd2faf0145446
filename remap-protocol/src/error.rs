//! Protocol-level decode errors.

use thiserror::Error;

/// Errors raised while decoding a reply into a typed value.
///
/// Reply-shape mismatches are checked errors here, not debug assertions:
/// a store handing back the wrong shape must fail loudly in every build.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("cannot parse integer from payload {0:?}")]
    ParseInt(String),

    #[error("cannot parse float from payload {0:?}")]
    ParseFloat(String),

    #[error("invalid UTF-8 in payload")]
    InvalidUtf8,

    #[error("unexpected reply shape: expected {expected}, got {actual}")]
    UnexpectedReply {
        expected: &'static str,
        actual: &'static str,
    },
}
