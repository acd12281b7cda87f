//! Backtick-quoted SQL identifiers.
//!
//! Table and field names are the only identifiers that reach the generated SQL.
//! How they are rendered depends on [`IdentifierPolicy`]:
//!
//! - `Verbatim`: the raw name is wrapped in backticks, e.g. `` `db.users` ``
//! - `Strict`: the name is split on `.` and every part must match
//!   `[A-Za-z_][A-Za-z0-9_$]*`; parts are quoted separately, e.g. `` `db`.`users` ``
//!
//! # Example
//! ```
//! use sqlizer::{Ident, IdentifierPolicy};
//!
//! let t = Ident::parse("db.users", IdentifierPolicy::Strict)?;
//! assert_eq!(t.to_sql(), "`db`.`users`");
//! # Ok::<(), sqlizer::SqlizerError>(())
//! ```

use crate::config::IdentifierPolicy;
use crate::error::{SqlizerError, SqlizerResult};

/// A SQL identifier (table or column name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub parts: Vec<String>,
}

impl Ident {
    /// Wrap a name as a single identifier part without validation.
    pub fn verbatim(name: &str) -> Self {
        Self {
            parts: vec![name.to_string()],
        }
    }

    /// Parse a name according to `policy`.
    pub fn parse(s: &str, policy: IdentifierPolicy) -> SqlizerResult<Self> {
        match policy {
            IdentifierPolicy::Verbatim => Ok(Self::verbatim(s)),
            IdentifierPolicy::Strict => Self::parse_strict(s),
        }
    }

    /// Parse a dotted identifier, validating every part.
    ///
    /// - Dotted: `schema.table.column`
    /// - Each part: `[A-Za-z_][A-Za-z0-9_$]*`
    pub fn parse_strict(s: &str) -> SqlizerResult<Self> {
        if s.is_empty() {
            return Err(SqlizerError::validation("Identifier cannot be empty"));
        }

        let mut parts = Vec::new();
        for segment in s.split('.') {
            if segment.is_empty() {
                return Err(SqlizerError::validation(format!(
                    "Empty identifier segment in '{s}'"
                )));
            }
            let mut chars = segment.chars();
            // First char: letter or underscore.
            if let Some(c) = chars.next() {
                if !(c == '_' || c.is_ascii_alphabetic()) {
                    return Err(SqlizerError::validation(format!(
                        "Invalid identifier start character: '{c}'"
                    )));
                }
            }
            // Subsequent chars: letter, digit, underscore, or $.
            if let Some(c) = chars.find(|&c| !(c == '_' || c == '$' || c.is_ascii_alphanumeric())) {
                return Err(SqlizerError::validation(format!(
                    "Invalid character in identifier: '{c}'"
                )));
            }
            parts.push(segment.to_string());
        }

        Ok(Self { parts })
    }

    /// Render the identifier as SQL.
    pub fn to_sql(&self) -> String {
        // two backticks per part, one dot between parts
        let cap = self.parts.iter().map(|p| p.len() + 3).sum::<usize>();
        let mut out = String::with_capacity(cap);
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push('`');
            out.push_str(part);
            out.push('`');
        }
    }
}
