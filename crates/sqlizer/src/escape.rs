//! Literal values and their inline SQL rendering.
//!
//! Values are embedded directly into the statement text, so every leaf of a
//! condition tree goes through this module:
//!
//! - [`escape_str`] backslash-escapes the bytes MySQL treats specially inside a literal
//! - [`quote`] wraps text in double quotes; numbers and booleans stay bare
//! - [`quote_like_pattern`] additionally escapes the `LIKE` wildcards `_` and `%`

use crate::error::{SqlizerError, SqlizerResult};
use bytes::Bytes;
use serde_json::{Number, Value};
use std::fmt::Write;

/// A scalar value that can appear on the value side of a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// SQL `NULL`.
    Null,
    /// Boolean, rendered bare (`true` / `false`).
    Bool(bool),
    /// Number, rendered bare.
    Number(Number),
    /// Text, escaped and double-quoted.
    Text(String),
    /// Binary data, rendered as a hex literal `X"..."`.
    Bytes(Bytes),
}

impl Literal {
    /// Convert a JSON scalar. Arrays and objects return `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Literal::Null),
            Value::Bool(b) => Some(Literal::Bool(*b)),
            Value::Number(n) => Some(Literal::Number(n.clone())),
            Value::String(s) => Some(Literal::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }

    /// Numbers and booleans are emitted without quotes.
    pub fn is_bare(&self) -> bool {
        matches!(self, Literal::Bool(_) | Literal::Number(_))
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Text(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::Text(s)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Literal::Number(n.into())
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Number(n.into())
    }
}

impl From<u64> for Literal {
    fn from(n: u64) -> Self {
        Literal::Number(n.into())
    }
}

impl From<f64> for Literal {
    /// Non-finite floats have no SQL literal and become `NULL`.
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Literal::Null, Literal::Number)
    }
}

impl From<Bytes> for Literal {
    fn from(b: Bytes) -> Self {
        Literal::Bytes(b)
    }
}

impl From<Vec<u8>> for Literal {
    fn from(b: Vec<u8>) -> Self {
        Literal::Bytes(Bytes::from(b))
    }
}

impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(v: Option<T>) -> Self {
        v.map_or(Literal::Null, Into::into)
    }
}

/// Backslash-escape `\0 \n \r \b \t \\ ' "` and `0x1A` for use inside a quoted literal.
pub fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for ch in s.chars() {
        match ch {
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\u{1a}' => out.push_str("\\Z"),
            '\\' | '\'' | '"' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

fn hex_literal(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2 + 3);
    out.push_str("X\"");
    for b in bytes {
        // writing to a String cannot fail
        let _ = write!(out, "{b:02x}");
    }
    out.push('"');
    out
}

/// Render a literal for embedding inside quotes (text is escaped, bytes become a hex literal).
pub fn escape(value: &Literal) -> String {
    match value {
        Literal::Null => "NULL".to_string(),
        Literal::Bool(b) => b.to_string(),
        Literal::Number(n) => n.to_string(),
        Literal::Text(s) => escape_str(s),
        Literal::Bytes(b) => hex_literal(b),
    }
}

/// Render a literal as a complete SQL value.
pub fn quote(value: &Literal) -> String {
    match value {
        Literal::Text(s) => format!("\"{}\"", escape_str(s)),
        other => escape(other),
    }
}

/// Render a `LIKE` operand as `"%<escaped>%"`.
///
/// One leading and one trailing `%` are stripped from the input if present, so
/// `"test"` and `"%test%"` both produce a contains-match. Wildcards left inside
/// the pattern are escaped and match literally.
pub fn quote_like_pattern(value: &Literal) -> SqlizerResult<String> {
    match value {
        Literal::Bool(_) | Literal::Number(_) => Ok(escape(value)),
        Literal::Text(s) => {
            let inner = s.strip_prefix('%').unwrap_or(s);
            let inner = inner.strip_suffix('%').unwrap_or(inner);
            let escaped = escape_str(inner);
            let mut out = String::with_capacity(escaped.len() + 4);
            out.push_str("\"%");
            for ch in escaped.chars() {
                if ch == '_' || ch == '%' {
                    out.push('\\');
                }
                out.push(ch);
            }
            out.push_str("%\"");
            Ok(out)
        }
        Literal::Null => Err(SqlizerError::invalid_condition(
            "$like operand cannot be null",
        )),
        Literal::Bytes(_) => Err(SqlizerError::invalid_condition(
            "$like operand cannot be binary",
        )),
    }
}
