//! Argument literal encoding
//!
//! Strings and numbers render as strict JSON literals, booleans as
//! `true`/`false`, and an absent optional as the bare token `undefined` so
//! every call of a category keeps the same arity.
//!
//! Coordinates print as `serde_json` prints the number they were read as.
//! An integer stays an integer; a float keeps its float form, so `1e3`
//! renders as `1000.0` and `-0.0` as `-0.0`. Both are valid literals for
//! the same value.

use std::fmt;

use topoforge_core::Coordinate;

/// Token emitted for an optional argument that was never supplied
pub const UNDEFINED: &str = "undefined";

/// One positional argument of a statement
#[derive(Debug, Clone, PartialEq)]
pub enum Literal<'a> {
    /// Quoted, JSON-escaped string
    Str(&'a str),
    /// Layout coordinate, in its JSON number form
    Number(&'a Coordinate),
    /// Non-negative integer
    Int(u32),
    /// Boolean
    Bool(bool),
    /// Optional argument left unset
    Undefined,
}

impl fmt::Display for Literal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(s) => {
                let encoded = serde_json::to_string(s).map_err(|_| fmt::Error)?;
                f.write_str(&encoded)
            }
            Literal::Number(n) => write!(f, "{n}"),
            Literal::Int(i) => write!(f, "{i}"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Undefined => f.write_str(UNDEFINED),
        }
    }
}

impl<'a> From<&'a str> for Literal<'a> {
    fn from(s: &'a str) -> Self {
        Literal::Str(s)
    }
}

impl<'a> From<&'a String> for Literal<'a> {
    fn from(s: &'a String) -> Self {
        Literal::Str(s)
    }
}

impl<'a> From<&'a Coordinate> for Literal<'a> {
    fn from(n: &'a Coordinate) -> Self {
        Literal::Number(n)
    }
}

impl From<u32> for Literal<'_> {
    fn from(i: u32) -> Self {
        Literal::Int(i)
    }
}

impl From<bool> for Literal<'_> {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl<'a, T: Into<Literal<'a>>> From<Option<T>> for Literal<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Literal::Undefined, Into::into)
    }
}
