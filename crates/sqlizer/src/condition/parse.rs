//! JSON condition description → [`ConditionTree`].

use super::ast::{Combinator, ConditionTree, FieldCondition, FieldOp, OperatorToken, TreeEntry};
use crate::config::UnknownOperatorPolicy;
use crate::error::{SqlizerError, SqlizerResult};
use crate::escape::Literal;
use serde_json::{Map, Value};

/// Parses JSON-shaped condition trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionParser {
    pub unknown_operator: UnknownOperatorPolicy,
}

impl ConditionParser {
    pub fn new(unknown_operator: UnknownOperatorPolicy) -> Self {
        Self { unknown_operator }
    }

    /// Parse a condition tree. Keys are visited in insertion order.
    pub fn parse(&self, conditions: &Map<String, Value>) -> SqlizerResult<ConditionTree> {
        let mut entries = Vec::with_capacity(conditions.len());
        for (key, value) in conditions {
            let entry = match key.as_str() {
                "$and" => self.parse_group(Combinator::And, value)?,
                "$or" => self.parse_group(Combinator::Or, value)?,
                _ => TreeEntry::Field {
                    name: key.clone(),
                    condition: self.parse_field(key, value)?,
                },
            };
            entries.push(entry);
        }
        Ok(ConditionTree { entries })
    }

    fn parse_group(&self, combinator: Combinator, value: &Value) -> SqlizerResult<TreeEntry> {
        match value {
            Value::Object(map) => Ok(TreeEntry::Nested {
                combinator,
                tree: self.parse(map)?,
            }),
            Value::Array(items) => {
                let trees = items
                    .iter()
                    .map(|item| match item {
                        Value::Object(map) => self.parse(map),
                        other => Err(SqlizerError::invalid_condition(format!(
                            "${} list items must be objects, got {other}",
                            combinator.as_sql().to_ascii_lowercase()
                        ))),
                    })
                    .collect::<SqlizerResult<Vec<_>>>()?;
                Ok(TreeEntry::Each { combinator, trees })
            }
            other => Err(SqlizerError::invalid_condition(format!(
                "${} expects an object or an array of objects, got {other}",
                combinator.as_sql().to_ascii_lowercase()
            ))),
        }
    }

    fn parse_field(&self, field: &str, value: &Value) -> SqlizerResult<FieldCondition> {
        match value {
            Value::Object(map) => Ok(FieldCondition::Ops(self.parse_ops(field, map)?)),
            Value::Array(_) => Err(SqlizerError::invalid_condition(format!(
                "field `{field}` has an array value; use $in for list membership"
            ))),
            scalar => Ok(FieldCondition::Equals(scalar_operand(field, "=", scalar)?)),
        }
    }

    fn parse_ops(&self, field: &str, ops: &Map<String, Value>) -> SqlizerResult<Vec<FieldOp>> {
        let mut parsed = Vec::with_capacity(ops.len());
        for (token, operand) in ops {
            let Some(op) = OperatorToken::lookup(token) else {
                match self.unknown_operator {
                    UnknownOperatorPolicy::Skip => {
                        tracing::debug!(
                            target: "sqlizer.where",
                            field,
                            token = %token,
                            "skipping unknown operator"
                        );
                        continue;
                    }
                    UnknownOperatorPolicy::Reject => {
                        return Err(SqlizerError::UnknownOperator(token.clone()));
                    }
                }
            };

            let op = match op {
                OperatorToken::Compare(op) => FieldOp::Compare {
                    op,
                    value: scalar_operand(field, op.symbol(), operand)?,
                },
                OperatorToken::Like => FieldOp::Like(scalar_operand(field, "LIKE", operand)?),
                OperatorToken::In | OperatorToken::NotIn => {
                    let negated = op == OperatorToken::NotIn;
                    let Value::Array(items) = operand else {
                        return Err(SqlizerError::invalid_condition(format!(
                            "{token} on `{field}` expects an array, got {operand}"
                        )));
                    };
                    let values = items
                        .iter()
                        .map(|item| scalar_operand(field, token, item))
                        .collect::<SqlizerResult<Vec<_>>>()?;
                    FieldOp::In { values, negated }
                }
                OperatorToken::Group(combinator) => {
                    let items = match operand {
                        Value::Array(items) => items
                            .iter()
                            .map(|item| self.parse_field(field, item))
                            .collect::<SqlizerResult<Vec<_>>>()?,
                        single => vec![self.parse_field(field, single)?],
                    };
                    FieldOp::Group { combinator, items }
                }
            };
            parsed.push(op);
        }
        Ok(parsed)
    }
}

fn scalar_operand(field: &str, op: &str, value: &Value) -> SqlizerResult<Literal> {
    Literal::from_json(value).ok_or_else(|| {
        SqlizerError::invalid_condition(format!(
            "{op} on `{field}` expects a scalar value, got {value}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::ast::CompareOp;
    use serde_json::json;

    fn parse(value: Value) -> SqlizerResult<ConditionTree> {
        let Value::Object(map) = value else {
            panic!("test input must be an object");
        };
        ConditionParser::default().parse(&map)
    }

    #[test]
    fn parses_bare_value_and_null() {
        let tree = parse(json!({"a": 1, "b": null})).unwrap();
        assert_eq!(
            tree,
            ConditionTree::new().eq("a", 1i64).eq("b", Literal::Null)
        );
    }

    #[test]
    fn token_lookup_ignores_case() {
        let tree = parse(json!({"a": {"$GTE": 3, "$NotIn": [1]}})).unwrap();
        assert_eq!(
            tree.entries[0],
            TreeEntry::Field {
                name: "a".into(),
                condition: FieldCondition::Ops(vec![
                    FieldOp::Compare {
                        op: CompareOp::Gte,
                        value: 3i64.into()
                    },
                    FieldOp::In {
                        values: vec![1i64.into()],
                        negated: true
                    },
                ]),
            }
        );
    }

    #[test]
    fn symbolic_aliases() {
        assert_eq!(
            OperatorToken::lookup("==="),
            Some(OperatorToken::Compare(CompareOp::Eq))
        );
        assert_eq!(
            OperatorToken::lookup("!=="),
            Some(OperatorToken::Compare(CompareOp::Neq))
        );
        assert_eq!(
            OperatorToken::lookup("<="),
            Some(OperatorToken::Compare(CompareOp::Lte))
        );
        assert_eq!(OperatorToken::lookup("$between"), None);
    }

    #[test]
    fn unknown_operator_skipped_by_default() {
        let tree = parse(json!({"a": {"$between": [1, 2], "$eq": 1}})).unwrap();
        let TreeEntry::Field { condition, .. } = &tree.entries[0] else {
            panic!("expected field entry");
        };
        assert_eq!(
            condition,
            &FieldCondition::op(FieldOp::Compare {
                op: CompareOp::Eq,
                value: 1i64.into()
            })
        );
    }

    #[test]
    fn unknown_operator_rejected_under_reject_policy() {
        let Value::Object(map) = json!({"a": {"$between": [1, 2]}}) else {
            unreachable!()
        };
        let err = ConditionParser::new(UnknownOperatorPolicy::Reject)
            .parse(&map)
            .unwrap_err();
        assert!(matches!(err, SqlizerError::UnknownOperator(t) if t == "$between"));
    }

    #[test]
    fn in_requires_array() {
        let err = parse(json!({"a": {"$in": 3}})).unwrap_err();
        assert!(matches!(err, SqlizerError::InvalidCondition(_)));
    }

    #[test]
    fn bare_array_value_rejected() {
        assert!(parse(json!({"a": [1, 2]})).is_err());
    }

    #[test]
    fn comparison_rejects_object_operand() {
        assert!(parse(json!({"a": {"$gt": {"x": 1}}})).is_err());
    }

    #[test]
    fn logical_group_requires_object() {
        assert!(parse(json!({"$or": 1})).is_err());
        assert!(parse(json!({"$or": [1]})).is_err());
    }

    #[test]
    fn logical_group_list() {
        let tree = parse(json!({"$or": [{"a": 1}, {"b": 2}]})).unwrap();
        assert_eq!(
            tree,
            ConditionTree::new().any(vec![
                ConditionTree::new().eq("a", 1i64),
                ConditionTree::new().eq("b", 2i64),
            ])
        );
    }

    #[test]
    fn field_group_scalar_is_wrapped() {
        let tree = parse(json!({"host": {"$or": "localhost"}})).unwrap();
        assert_eq!(
            tree.entries[0],
            TreeEntry::Field {
                name: "host".into(),
                condition: FieldCondition::op(FieldOp::Group {
                    combinator: Combinator::Or,
                    items: vec![FieldCondition::Equals("localhost".into())],
                }),
            }
        );
    }
}
