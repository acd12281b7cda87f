//! SELECT-list, ORDER BY / GROUP BY and LIMIT clause rendering.

use crate::error::{SqlizerError, SqlizerResult};
use crate::pagination::int_from_json;
use crate::statement::QueryOptions;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Column name the count query selects; see [`extract_count`](crate::extract_count).
pub const COUNT_COLUMN: &str = "COUNT(0)";

/// ORDER BY / GROUP BY input: a raw clause or a list of items.
///
/// Items are emitted verbatim, so they may carry a direction (`"created_at DESC"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderBy {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for OrderBy {
    fn from(s: &str) -> Self {
        OrderBy::One(s.to_string())
    }
}

impl From<String> for OrderBy {
    fn from(s: String) -> Self {
        OrderBy::One(s)
    }
}

impl From<Vec<String>> for OrderBy {
    fn from(items: Vec<String>) -> Self {
        OrderBy::Many(items)
    }
}

impl From<Vec<&str>> for OrderBy {
    fn from(items: Vec<&str>) -> Self {
        OrderBy::Many(items.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for OrderBy {
    fn from(items: [&str; N]) -> Self {
        OrderBy::Many(items.into_iter().map(str::to_string).collect())
    }
}

/// Render an ORDER BY / GROUP BY list. List items are joined with `,`; empty input yields `""`.
pub fn order_clause(order: &OrderBy) -> String {
    match order {
        OrderBy::One(s) => s.clone(),
        OrderBy::Many(items) => items.join(","),
    }
}

/// Normalized `[skip, limit]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitPair {
    pub skip: i64,
    pub limit: i64,
}

impl LimitPair {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }

    /// Normalize a 0–2 element `[skip, limit]` list.
    ///
    /// - `[]` → skip 0, limit 1
    /// - `[n]` → skip 0, limit n
    /// - `[s, n]` → skip s, limit n
    ///
    /// `null` entries count as missing. Entries may be integers or integer-prefixed strings.
    pub fn from_values(items: &[Value]) -> SqlizerResult<Self> {
        if items.len() > 2 {
            return Err(SqlizerError::config(format!(
                "limit expects at most 2 elements [skip, limit] but got {}",
                items.len()
            )));
        }

        let entry = |idx: usize| -> SqlizerResult<Option<i64>> {
            match items.get(idx) {
                None | Some(Value::Null) => Ok(None),
                Some(v) => match int_from_json(v) {
                    Some(n) if n >= 0 => Ok(Some(n)),
                    _ => Err(SqlizerError::config(format!(
                        "limit entries must be non-negative integers but got: {v}"
                    ))),
                },
            }
        };

        let pair = match (entry(0)?, entry(1)?) {
            (None, None) => Self::new(0, 1),
            (Some(limit), None) | (None, Some(limit)) => Self::new(0, limit),
            (Some(skip), Some(limit)) => Self::new(skip, limit),
        };
        Ok(pair)
    }

    /// Normalize a JSON limit value, which must be an array.
    pub fn from_json(value: &Value) -> SqlizerResult<Self> {
        match value {
            Value::Array(items) => Self::from_values(items),
            other => Err(SqlizerError::config(format!(
                "Type of limit should be array but got: {other}"
            ))),
        }
    }

    pub fn to_array(self) -> [i64; 2] {
        [self.skip, self.limit]
    }
}

impl From<LimitPair> for Value {
    fn from(pair: LimitPair) -> Self {
        Value::from(vec![pair.skip, pair.limit])
    }
}

/// Render a LIMIT clause body: `"skip, limit"`, or only `"limit"` when `upper_only`.
pub fn limit_clause(value: &Value, upper_only: bool) -> SqlizerResult<String> {
    let pair = LimitPair::from_json(value)?;
    if upper_only {
        return Ok(pair.limit.to_string());
    }
    Ok(format!("{}, {}", pair.skip, pair.limit))
}

/// Render the SELECT list for the given options: `*`, a field list, `COUNT(0)` or `DISTINCT ...`.
pub fn select_clause(options: &QueryOptions) -> SqlizerResult<String> {
    options.validate()?;

    if options.count {
        return Ok(COUNT_COLUMN.to_string());
    }
    if let Some(fields) = options.fields.as_ref().filter(|f| !f.is_empty()) {
        return Ok(fields.join(","));
    }
    if let Some(distincts) = options.distincts.as_ref().filter(|d| !d.is_empty()) {
        return Ok(format!("DISTINCT {}", distincts.join(",")));
    }
    Ok("*".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn order_string_verbatim() {
        assert_eq!(order_clause(&"key1 DESC".into()), "key1 DESC");
    }

    #[test]
    fn order_list_joined_without_space() {
        assert_eq!(order_clause(&["a asc", "b desc"].into()), "a asc,b desc");
    }

    #[test]
    fn order_empty() {
        assert_eq!(order_clause(&"".into()), "");
        assert_eq!(order_clause(&OrderBy::Many(vec![])), "");
    }

    #[test]
    fn order_deserializes_both_shapes() {
        let one: OrderBy = serde_json::from_value(json!("id")).unwrap();
        let many: OrderBy = serde_json::from_value(json!(["id", "name"])).unwrap();
        assert_eq!(one, OrderBy::One("id".into()));
        assert_eq!(many, OrderBy::Many(vec!["id".into(), "name".into()]));
    }

    #[test]
    fn limit_pair_rules() {
        assert_eq!(LimitPair::from_values(&[]).unwrap(), LimitPair::new(0, 1));
        assert_eq!(
            LimitPair::from_values(&[json!(5)]).unwrap(),
            LimitPair::new(0, 5)
        );
        assert_eq!(
            LimitPair::from_values(&[json!(10), json!(20)]).unwrap(),
            LimitPair::new(10, 20)
        );
        assert_eq!(
            LimitPair::from_values(&[Value::Null, json!(20)]).unwrap(),
            LimitPair::new(0, 20)
        );
    }

    #[test]
    fn limit_accepts_numeric_strings() {
        assert_eq!(
            LimitPair::from_values(&[json!("10"), json!("20")]).unwrap(),
            LimitPair::new(10, 20)
        );
    }

    #[test]
    fn limit_rejects_garbage() {
        assert!(LimitPair::from_values(&[json!("abc")]).is_err());
        assert!(LimitPair::from_values(&[json!(-1), json!(5)]).is_err());
        assert!(LimitPair::from_values(&[json!(1), json!(2), json!(3)]).is_err());
    }

    #[test]
    fn limit_clause_rendering() {
        assert_eq!(limit_clause(&json!([10, 20]), false).unwrap(), "10, 20");
        assert_eq!(limit_clause(&json!([10, 20]), true).unwrap(), "20");
        assert_eq!(limit_clause(&json!([7]), false).unwrap(), "0, 7");
    }

    #[test]
    fn limit_clause_requires_array() {
        let err = limit_clause(&json!(10), false).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn limit_pair_into_json() {
        assert_eq!(Value::from(LimitPair::new(10, 5)), json!([10, 5]));
    }

    #[test]
    fn select_list_variants() {
        assert_eq!(select_clause(&QueryOptions::new()).unwrap(), "*");
        assert_eq!(
            select_clause(&QueryOptions::new().fields(["id", "type"])).unwrap(),
            "id,type"
        );
        assert_eq!(
            select_clause(&QueryOptions::new().count()).unwrap(),
            "COUNT(0)"
        );
        assert_eq!(
            select_clause(&QueryOptions::new().distincts(["city", "zip"])).unwrap(),
            "DISTINCT city,zip"
        );
    }

    #[test]
    fn select_list_conflict() {
        let options = QueryOptions::new().fields(["id"]).count();
        assert!(select_clause(&options).unwrap_err().is_config());
    }

    #[test]
    fn empty_lists_count_as_unset() {
        let options = QueryOptions {
            fields: Some(vec![]),
            ..QueryOptions::default()
        }
        .count();
        assert_eq!(select_clause(&options).unwrap(), "COUNT(0)");
    }
}
