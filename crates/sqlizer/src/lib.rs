//! # sqlizer
//!
//! Builds MySQL-dialect SELECT statements from declarative JSON query descriptions.
//!
//! ## Features
//!
//! - **Condition trees**: `{"age": {"$gte": 18}, "$or": {...}}` → a parenthesized WHERE expression
//! - **Inline escaping**: values are written into the SQL as MySQL literals, no bind parameters
//! - **Projections**: `*`, field lists, `COUNT(0)` and `DISTINCT`
//! - **Pagination**: page/size → `LIMIT skip, limit`, count-result extraction
//! - **Key conversion**: snake_case ⇄ camelCase for result rows
//! - **Statement logging**: generated SQL is emitted through `tracing`
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use sqlizer::{Query, QueryOptions, build_statement};
//!
//! let query = Query::from_json(json!({
//!     "table": "test",
//!     "where": {
//!         "key1": "value1",
//!         "key2": {"$or": {"$neq": "value2", "$in": [2, 3, 4]}},
//!         "key3": {"$like": "%test%"},
//!     },
//!     "limit": [10, 20],
//!     "orderBy": "key1 DESC",
//! }))?;
//!
//! let sql = build_statement(&query, Some(&QueryOptions::new().fields(["id", "type"])))?;
//! assert_eq!(
//!     sql,
//!     "SELECT id,type FROM `test` WHERE (`key1` = \"value1\" AND ((`key2` != \"value2\" OR `key2` IN (2, 3, 4))) AND (`key3` LIKE \"%test%\")) ORDER BY key1 DESC LIMIT 10, 20"
//! );
//! # Ok::<(), sqlizer::SqlizerError>(())
//! ```

pub mod case;
pub mod clause;
pub mod condition;
pub mod config;
pub mod datetime;
pub mod error;
pub mod escape;
pub mod ident;
pub mod log;
pub mod pagination;
pub mod statement;

pub use case::{
    DEFAULT_DEPTH, KeyCase, camelize, convert_keys, rows_to_camel, snakelize, to_camel, to_snake,
};
pub use clause::{COUNT_COLUMN, LimitPair, OrderBy, limit_clause, order_clause, select_clause};
pub use condition::{
    Combinator, CompareOp, ConditionCompiler, ConditionParser, ConditionTree, FieldCondition,
    FieldOp, OperatorToken, TreeEntry, compile_where, parse_where,
};
pub use config::{IdentifierPolicy, SqlizerConfig, UnknownOperatorPolicy};
pub use datetime::{DATETIME_FORMAT, DateLike, format_datetime};
pub use error::{SqlizerError, SqlizerResult};
pub use escape::{Literal, escape, escape_str, quote, quote_like_pattern};
pub use ident::Ident;
pub use log::{SqlLogger, StatementKind};
pub use pagination::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, PageArg, Row, extract_count, pagination_to_limit,
};
pub use statement::{PagedStatements, Query, QueryOptions, Sqlizer, build_statement};
