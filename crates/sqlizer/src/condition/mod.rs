//! Condition trees and their compilation into WHERE expressions.
//!
//! A condition tree is a JSON object whose keys are either field names or the
//! logical keys `$and` / `$or`:
//!
//! ```
//! use serde_json::json;
//!
//! let sql = sqlizer::compile_where(json!({
//!     "status": "active",
//!     "age": { "$gte": 18 },
//!     "$or": { "role": "admin", "owner_id": 7 },
//! }).as_object().unwrap())?;
//!
//! assert_eq!(
//!     sql,
//!     "(`status` = \"active\" AND (`age` >= 18) AND (`role` = \"admin\" OR `owner_id` = 7))"
//! );
//! # Ok::<(), sqlizer::SqlizerError>(())
//! ```
//!
//! Supported operator tokens inside a field condition (case-insensitive):
//! `$eq`/`===`, `$neq`/`!==`, `$lt`/`<`, `$gt`/`>`, `$lte`/`<=`, `$gte`/`>=`,
//! `$like`, `$in`, `$notin`, and a nested `$and`/`$or` scoped to the same field.

pub mod ast;
pub mod compile;
pub mod parse;

pub use ast::{
    Combinator, CompareOp, ConditionTree, FieldCondition, FieldOp, OperatorToken, TreeEntry,
};
pub use compile::ConditionCompiler;
pub use parse::ConditionParser;

use crate::error::SqlizerResult;
use serde_json::{Map, Value};

/// Parse a JSON condition tree with the default (permissive) policy.
pub fn parse_where(conditions: &Map<String, Value>) -> SqlizerResult<ConditionTree> {
    ConditionParser::default().parse(conditions)
}

/// Compile a JSON condition tree into a parenthesized boolean expression.
///
/// Returns an empty string for an empty tree.
pub fn compile_where(conditions: &Map<String, Value>) -> SqlizerResult<String> {
    let tree = parse_where(conditions)?;
    ConditionCompiler::default().compile(&tree, Combinator::And)
}
