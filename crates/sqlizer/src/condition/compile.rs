//! [`ConditionTree`] → parenthesized boolean SQL.

use super::ast::{CompareOp, Combinator, ConditionTree, FieldCondition, FieldOp, TreeEntry};
use crate::config::IdentifierPolicy;
use crate::error::SqlizerResult;
use crate::escape::{quote, quote_like_pattern};
use crate::ident::Ident;

/// Compiles condition trees into SQL boolean expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionCompiler {
    pub identifier_policy: IdentifierPolicy,
}

impl ConditionCompiler {
    pub fn new(identifier_policy: IdentifierPolicy) -> Self {
        Self { identifier_policy }
    }

    /// Compile `tree`, joining its entries with `combinator`.
    ///
    /// The result is wrapped in exactly one pair of parentheses, or is empty when
    /// the tree produces no fragment at all. Callers must omit `WHERE` in that case.
    pub fn compile(&self, tree: &ConditionTree, combinator: Combinator) -> SqlizerResult<String> {
        let mut parts = Vec::with_capacity(tree.entries.len());
        for entry in &tree.entries {
            let part = match entry {
                TreeEntry::Nested { combinator, tree } => self.compile(tree, *combinator)?,
                TreeEntry::Each { combinator, trees } => {
                    let mut each = Vec::with_capacity(trees.len());
                    for tree in trees {
                        each.push(self.compile(tree, Combinator::And)?);
                    }
                    wrap(join(each, *combinator))
                }
                TreeEntry::Field { name, condition } => {
                    let column = Ident::parse(name, self.identifier_policy)?.to_sql();
                    self.compile_field(&column, condition, Combinator::And)?
                }
            };
            parts.push(part);
        }
        Ok(wrap(join(parts, combinator)))
    }

    /// Compile a field condition against an already rendered column.
    fn compile_field(
        &self,
        column: &str,
        condition: &FieldCondition,
        joiner: Combinator,
    ) -> SqlizerResult<String> {
        let ops = match condition {
            FieldCondition::Equals(value) if value.is_null() => {
                return Ok(format!("{column} IS NULL"));
            }
            FieldCondition::Equals(value) => return Ok(format!("{column} = {}", quote(value))),
            FieldCondition::Ops(ops) => ops,
        };

        let mut fragments = Vec::with_capacity(ops.len());
        for op in ops {
            let fragment = match op {
                FieldOp::Compare { op, value } if value.is_null() => match op {
                    CompareOp::Eq => format!("{column} IS NULL"),
                    CompareOp::Neq => format!("{column} IS NOT NULL"),
                    _ => {
                        tracing::debug!(
                            target: "sqlizer.where",
                            column,
                            op = op.symbol(),
                            "no SQL for ordering comparison against null"
                        );
                        String::new()
                    }
                },
                FieldOp::Compare { op, value } => {
                    format!("{column} {} {}", op.symbol(), quote(value))
                }
                FieldOp::Like(pattern) => format!("{column} LIKE {}", quote_like_pattern(pattern)?),
                FieldOp::In { values, negated } => {
                    if values.is_empty() {
                        // Empty list: IN matches nothing, NOT IN matches everything
                        let constant = if *negated { "1=1" } else { "1=0" };
                        constant.to_string()
                    } else {
                        let list = values.iter().map(quote).collect::<Vec<_>>().join(", ");
                        let keyword = if *negated { "NOT IN" } else { "IN" };
                        format!("{column} {keyword} ({list})")
                    }
                }
                FieldOp::Group { combinator, items } => {
                    let mut sub = Vec::with_capacity(items.len());
                    for item in items {
                        sub.push(self.compile_field(column, item, *combinator)?);
                    }
                    join(sub, *combinator)
                }
            };
            fragments.push(fragment);
        }
        Ok(wrap(join(fragments, joiner)))
    }
}

/// Join the non-empty parts with the combinator.
fn join(parts: Vec<String>, combinator: Combinator) -> String {
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(combinator.separator())
}

fn wrap(sql: String) -> String {
    if sql.is_empty() {
        sql
    } else {
        format!("({sql})")
    }
}
