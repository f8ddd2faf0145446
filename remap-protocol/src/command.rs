//! Verbs, typed arguments, and per-call command values.

use crate::kind::Kind;
use std::borrow::Cow;
use std::fmt;

/// Command verbs understood by the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Set,
    Get,
    Exists,
}

impl Verb {
    /// Returns the wire spelling of the verb.
    pub const fn as_str(self) -> &'static str {
        match self {
            Verb::Set => "SET",
            Verb::Get => "GET",
            Verb::Exists => "EXISTS",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed command argument.
///
/// Text borrows the caller's bytes; numeric kinds carry their native
/// representation. No string formatting happens at this stage - rendering
/// to wire bytes is done by the transport, per the argument's format token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg<'a> {
    Text(&'a [u8]),
    Int32(i32),
    Float32(f32),
    Float64(f64),
}

impl Arg<'_> {
    /// Returns the kind of this argument.
    pub const fn kind(&self) -> Kind {
        match self {
            Arg::Text(_) => Kind::Text,
            Arg::Int32(_) => Kind::Int32,
            Arg::Float32(_) => Kind::Float32,
            Arg::Float64(_) => Kind::Float64,
        }
    }

    /// Renders the argument to the bytes a text-protocol store expects.
    ///
    /// Text passes through unchanged; numeric kinds render in the shortest
    /// base-10 form that parses back to the same value.
    pub fn render(&self) -> Cow<'_, [u8]> {
        match self {
            Arg::Text(bytes) => Cow::Borrowed(*bytes),
            Arg::Int32(v) => Cow::Owned(v.to_string().into_bytes()),
            Arg::Float32(v) => Cow::Owned(v.to_string().into_bytes()),
            Arg::Float64(v) => Cow::Owned(v.to_string().into_bytes()),
        }
    }
}

/// An ephemeral command, built per call and consumed by one transport
/// round trip: a verb, one encoded key, and (for SET) one encoded value.
#[derive(Debug, Clone, Copy)]
pub struct Command<'a> {
    verb: Verb,
    key: Arg<'a>,
    value: Option<Arg<'a>>,
}

impl<'a> Command<'a> {
    /// Builds a SET command.
    pub fn set(key: Arg<'a>, value: Arg<'a>) -> Self {
        Self {
            verb: Verb::Set,
            key,
            value: Some(value),
        }
    }

    /// Builds a GET command.
    pub fn get(key: Arg<'a>) -> Self {
        Self {
            verb: Verb::Get,
            key,
            value: None,
        }
    }

    /// Builds an EXISTS command.
    pub fn exists(key: Arg<'a>) -> Self {
        Self {
            verb: Verb::Exists,
            key,
            value: None,
        }
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn key(&self) -> &Arg<'a> {
        &self.key
    }

    pub fn value(&self) -> Option<&Arg<'a>> {
        self.value.as_ref()
    }

    /// Iterates over the arguments in wire order (key, then value if any).
    pub fn args(&self) -> impl Iterator<Item = &Arg<'a>> {
        std::iter::once(&self.key).chain(self.value.iter())
    }

    /// Builds the format-token template for this command, e.g. `SET %s %d`.
    ///
    /// The template is diagnostic: transports render each argument per its
    /// own token, so the template never touches the wire.
    pub fn template(&self) -> String {
        let mut out = String::from(self.verb.as_str());
        for arg in self.args() {
            out.push(' ');
            out.push_str(arg.kind().token());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_spelling() {
        assert_eq!(Verb::Set.as_str(), "SET");
        assert_eq!(Verb::Get.as_str(), "GET");
        assert_eq!(Verb::Exists.as_str(), "EXISTS");
    }

    #[test]
    fn test_arg_kinds() {
        assert_eq!(Arg::Text(b"a").kind(), Kind::Text);
        assert_eq!(Arg::Int32(1).kind(), Kind::Int32);
        assert_eq!(Arg::Float32(1.0).kind(), Kind::Float32);
        assert_eq!(Arg::Float64(1.0).kind(), Kind::Float64);
    }

    #[test]
    fn test_arg_render() {
        assert_eq!(Arg::Text(b"hello").render().as_ref(), b"hello");
        assert_eq!(Arg::Int32(-42).render().as_ref(), b"-42");
        assert_eq!(Arg::Float32(1.5).render().as_ref(), b"1.5");
        assert_eq!(Arg::Float64(-0.25).render().as_ref(), b"-0.25");
    }

    #[test]
    fn test_render_round_trips_floats() {
        let value = 0.1f64 + 0.2f64;
        let rendered = Arg::Float64(value).render().into_owned();
        let text = String::from_utf8(rendered).unwrap();
        assert_eq!(text.parse::<f64>().unwrap(), value);
    }

    #[test]
    fn test_command_template() {
        let cmd = Command::set(Arg::Text(b"k"), Arg::Int32(7));
        assert_eq!(cmd.template(), "SET %s %d");

        let cmd = Command::get(Arg::Float64(1.0));
        assert_eq!(cmd.template(), "GET %f");

        let cmd = Command::exists(Arg::Text(b"k"));
        assert_eq!(cmd.template(), "EXISTS %s");
    }

    #[test]
    fn test_command_args_order() {
        let cmd = Command::set(Arg::Text(b"k"), Arg::Text(b"v"));
        let args: Vec<_> = cmd.args().map(|a| a.render().into_owned()).collect();
        assert_eq!(args, vec![b"k".to_vec(), b"v".to_vec()]);

        let cmd = Command::get(Arg::Text(b"k"));
        assert_eq!(cmd.args().count(), 1);
        assert!(cmd.value().is_none());
    }
}
