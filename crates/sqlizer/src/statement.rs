//! Statement assembly: query description + options → one SELECT statement.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use sqlizer::{Query, QueryOptions, build_statement};
//!
//! let query = Query::new("users")
//!     .filter(json!({"status": "active", "age": {"$gte": 18}}))
//!     .order_by("created_at DESC")
//!     .limit(json!([0, 20]));
//!
//! assert_eq!(
//!     build_statement(&query, None)?,
//!     "SELECT * FROM `users` WHERE (`status` = \"active\" AND (`age` >= 18)) ORDER BY created_at DESC LIMIT 0, 20"
//! );
//!
//! let count = build_statement(&query, Some(&QueryOptions::new().count()))?;
//! assert_eq!(
//!     count,
//!     "SELECT COUNT(0) FROM `users` WHERE (`status` = \"active\" AND (`age` >= 18))"
//! );
//! # Ok::<(), sqlizer::SqlizerError>(())
//! ```

use crate::clause::{OrderBy, LimitPair, limit_clause, order_clause, select_clause};
use crate::condition::{Combinator, ConditionCompiler, ConditionParser};
use crate::config::SqlizerConfig;
use crate::error::{SqlizerError, SqlizerResult};
use crate::ident::Ident;
use crate::log::StatementKind;
use crate::pagination::{PageArg, pagination_to_limit};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Declarative description of a single-table SELECT.
///
/// Deserializes from the JSON shape
/// `{ "table": ..., "where": {...}, "orderBy": ..., "limit": [skip, limit], "groupBy": ... }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Query {
    /// Table name (required, non-empty).
    pub table: String,
    /// Condition tree; must be an object when present.
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderBy>,
    /// `[skip, limit]`; must be an array when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<OrderBy>,
}

impl Query {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Deserialize a query description from JSON.
    pub fn from_json(value: Value) -> SqlizerResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Set the condition tree.
    pub fn filter(mut self, conditions: Value) -> Self {
        self.conditions = Some(conditions);
        self
    }

    pub fn order_by(mut self, order: impl Into<OrderBy>) -> Self {
        self.order_by = Some(order.into());
        self
    }

    pub fn group_by(mut self, group: impl Into<OrderBy>) -> Self {
        self.group_by = Some(group.into());
        self
    }

    /// Set `[skip, limit]`, e.g. `json!([10, 20])` or a [`LimitPair`].
    pub fn limit(mut self, limit: impl Into<Value>) -> Self {
        self.limit = Some(limit.into());
        self
    }
}

/// SELECT-list options. At most one of `fields`, `count` and `distincts` may be set;
/// an empty list counts as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    pub fields: Option<Vec<String>>,
    pub count: bool,
    pub distincts: Option<Vec<String>>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select only these fields.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Build a `COUNT(0)` query.
    pub fn count(mut self) -> Self {
        self.count = true;
        self
    }

    /// Select `DISTINCT` over these fields.
    pub fn distincts<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.distincts = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Fail if more than one projection is requested.
    pub fn validate(&self) -> SqlizerResult<()> {
        let is_set = |list: &Option<Vec<String>>| list.as_ref().is_some_and(|l| !l.is_empty());
        let set = [is_set(&self.fields), self.count, is_set(&self.distincts)]
            .into_iter()
            .filter(|&s| s)
            .count();
        if set > 1 {
            return Err(SqlizerError::config(format!(
                "only one of fields, count and distincts can be set but got: {self:?}"
            )));
        }
        Ok(())
    }
}

/// Row and count statements for one page of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedStatements {
    /// Statement returning the requested page.
    pub rows: String,
    /// `COUNT(0)` statement over the same table, conditions and grouping.
    pub count: String,
    /// The `[skip, limit]` pair applied to `rows`.
    pub limit: LimitPair,
}

/// Configured statement builder.
///
/// `Sqlizer` only holds configuration; it is cheap to clone and safe to share
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct Sqlizer {
    config: SqlizerConfig,
}

impl Sqlizer {
    pub fn new(config: SqlizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SqlizerConfig {
        &self.config
    }

    fn parser(&self) -> ConditionParser {
        ConditionParser::new(self.config.unknown_operator)
    }

    fn compiler(&self) -> ConditionCompiler {
        ConditionCompiler::new(self.config.identifier_policy)
    }

    /// Compile a JSON condition tree; empty trees yield `""`.
    pub fn compile_where(&self, conditions: &Map<String, Value>) -> SqlizerResult<String> {
        let tree = self.parser().parse(conditions)?;
        self.compiler().compile(&tree, Combinator::And)
    }

    fn where_clause(&self, conditions: &Value) -> SqlizerResult<String> {
        match conditions {
            Value::Null => Ok(String::new()),
            Value::Object(map) => self.compile_where(map),
            other => Err(SqlizerError::invalid_condition(format!(
                "where must be an object but got: {other}"
            ))),
        }
    }

    /// Build the SELECT statement for `query`.
    ///
    /// Count queries never carry ORDER BY or LIMIT.
    pub fn statement(&self, query: &Query, options: &QueryOptions) -> SqlizerResult<String> {
        let select = select_clause(options)?;

        if query.table.is_empty() {
            return Err(SqlizerError::config("Table name is required"));
        }
        let table = Ident::parse(&query.table, self.config.identifier_policy)?;

        let mut sql = String::with_capacity(128);
        sql.push_str("SELECT ");
        sql.push_str(&select);
        sql.push_str(" FROM ");
        table.write_sql(&mut sql);
        sql.push(' ');

        if let Some(conditions) = &query.conditions {
            let where_sql = self.where_clause(conditions)?;
            if !where_sql.is_empty() {
                sql.push_str("WHERE ");
                sql.push_str(&where_sql);
                sql.push(' ');
            }
        }

        if let Some(group_by) = &query.group_by {
            let group = order_clause(group_by);
            if !group.is_empty() {
                sql.push_str("GROUP BY ");
                sql.push_str(&group);
                sql.push(' ');
            }
        }

        if options.count {
            return Ok(self.finish(sql, StatementKind::Count, &query.table));
        }

        if let Some(order_by) = &query.order_by {
            let order = order_clause(order_by);
            if !order.is_empty() {
                sql.push_str("ORDER BY ");
                sql.push_str(&order);
                sql.push(' ');
            }
        }

        if let Some(limit) = query.limit.as_ref().filter(|l| !l.is_null()) {
            sql.push_str("LIMIT ");
            sql.push_str(&limit_clause(limit, false)?);
        }

        Ok(self.finish(sql, StatementKind::Select, &query.table))
    }

    /// Build the statements for one page: the rows (with a computed LIMIT) and the total count.
    pub fn paged(
        &self,
        query: &Query,
        options: &QueryOptions,
        page: impl PageArg,
        size: impl PageArg,
    ) -> SqlizerResult<PagedStatements> {
        if options.count {
            return Err(SqlizerError::config(
                "paged queries need a row projection, not count",
            ));
        }
        let limit = pagination_to_limit(page, size)?;

        let mut page_query = query.clone();
        page_query.limit = Some(limit.into());

        let rows = self.statement(&page_query, options)?;
        let count = self.statement(query, &QueryOptions::new().count())?;
        Ok(PagedStatements { rows, count, limit })
    }

    fn finish(&self, mut sql: String, kind: StatementKind, table: &str) -> String {
        sql.truncate(sql.trim_end().len());
        if let Some(logger) = &self.config.sql_logger {
            logger.emit(kind, table, &sql);
        }
        sql
    }
}

/// Build a SELECT statement with the default configuration.
///
/// `options` defaults to `SELECT *`.
pub fn build_statement(query: &Query, options: Option<&QueryOptions>) -> SqlizerResult<String> {
    let default_options = QueryOptions::default();
    Sqlizer::default().statement(query, options.unwrap_or(&default_options))
}
