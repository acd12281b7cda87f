//! Typed condition tree.
//!
//! JSON condition descriptions are parsed into these types once (see
//! [`parse`](super::parse)); SQL generation only ever sees the typed form.

use crate::escape::Literal;

/// Logical operator joining sibling fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combinator {
    #[default]
    And,
    Or,
}

impl Combinator {
    pub fn as_sql(self) -> &'static str {
        match self {
            Combinator::And => "AND",
            Combinator::Or => "OR",
        }
    }

    /// Separator placed between joined fragments (`" AND "` / `" OR "`).
    pub(crate) fn separator(self) -> &'static str {
        match self {
            Combinator::And => " AND ",
            Combinator::Or => " OR ",
        }
    }
}

/// Binary comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `!=`
    Neq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Lte,
    /// `>=`
    Gte,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Neq => "!=",
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Lte => "<=",
            CompareOp::Gte => ">=",
        }
    }
}

/// Operator token found as a key inside a field condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorToken {
    Compare(CompareOp),
    Like,
    In,
    NotIn,
    /// Nested `$and` / `$or` scoped to the same field.
    Group(Combinator),
}

/// Token spellings, lower-case.
const OPERATOR_TOKENS: &[(&str, OperatorToken)] = &[
    ("$eq", OperatorToken::Compare(CompareOp::Eq)),
    ("===", OperatorToken::Compare(CompareOp::Eq)),
    ("$neq", OperatorToken::Compare(CompareOp::Neq)),
    ("!==", OperatorToken::Compare(CompareOp::Neq)),
    ("$lt", OperatorToken::Compare(CompareOp::Lt)),
    ("<", OperatorToken::Compare(CompareOp::Lt)),
    ("$gt", OperatorToken::Compare(CompareOp::Gt)),
    (">", OperatorToken::Compare(CompareOp::Gt)),
    ("$lte", OperatorToken::Compare(CompareOp::Lte)),
    ("<=", OperatorToken::Compare(CompareOp::Lte)),
    ("$gte", OperatorToken::Compare(CompareOp::Gte)),
    (">=", OperatorToken::Compare(CompareOp::Gte)),
    ("$like", OperatorToken::Like),
    ("$in", OperatorToken::In),
    ("$notin", OperatorToken::NotIn),
    ("$and", OperatorToken::Group(Combinator::And)),
    ("$or", OperatorToken::Group(Combinator::Or)),
];

impl OperatorToken {
    /// Resolve a token spelling, ignoring ASCII case.
    pub fn lookup(token: &str) -> Option<Self> {
        OPERATOR_TOKENS
            .iter()
            .find(|(spelling, _)| spelling.eq_ignore_ascii_case(token))
            .map(|(_, op)| *op)
    }
}

/// A boolean filter: entries joined by the combinator chosen at compile time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionTree {
    pub entries: Vec<TreeEntry>,
}

/// One key of a condition tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeEntry {
    /// `$and` / `$or` over a nested tree; the combinator joins that tree's entries.
    Nested {
        combinator: Combinator,
        tree: ConditionTree,
    },
    /// `$and` / `$or` over a list of trees; the combinator joins the trees.
    Each {
        combinator: Combinator,
        trees: Vec<ConditionTree>,
    },
    /// A condition on a single field.
    Field {
        name: String,
        condition: FieldCondition,
    },
}

/// Condition scoped to one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldCondition {
    /// Bare value: `field = value`, or `field IS NULL` for null.
    Equals(Literal),
    /// Operator map; fragments are joined and wrapped in one pair of parentheses.
    Ops(Vec<FieldOp>),
}

/// One operator/operand pair of a field condition.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOp {
    Compare { op: CompareOp, value: Literal },
    Like(Literal),
    In { values: Vec<Literal>, negated: bool },
    /// Each item is compiled against the same field and joined with `combinator`.
    Group {
        combinator: Combinator,
        items: Vec<FieldCondition>,
    },
}

impl ConditionTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(mut self, entry: TreeEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Add a field condition.
    pub fn field(self, name: impl Into<String>, condition: FieldCondition) -> Self {
        self.push(TreeEntry::Field {
            name: name.into(),
            condition,
        })
    }

    /// `field = value` (`IS NULL` for null).
    pub fn eq(self, name: impl Into<String>, value: impl Into<Literal>) -> Self {
        self.field(name, FieldCondition::Equals(value.into()))
    }

    /// `field <op> value`.
    pub fn cmp(self, name: impl Into<String>, op: CompareOp, value: impl Into<Literal>) -> Self {
        self.field(name, FieldCondition::op(FieldOp::Compare { op, value: value.into() }))
    }

    /// `field LIKE "%pattern%"`.
    pub fn like(self, name: impl Into<String>, pattern: impl Into<Literal>) -> Self {
        self.field(name, FieldCondition::op(FieldOp::Like(pattern.into())))
    }

    /// `field IN (...)`.
    pub fn in_list<T: Into<Literal>>(self, name: impl Into<String>, values: Vec<T>) -> Self {
        self.field(name, FieldCondition::op(FieldOp::in_list(values, false)))
    }

    /// `field NOT IN (...)`.
    pub fn not_in<T: Into<Literal>>(self, name: impl Into<String>, values: Vec<T>) -> Self {
        self.field(name, FieldCondition::op(FieldOp::in_list(values, true)))
    }

    /// Nested tree whose entries are joined with AND.
    pub fn and(self, tree: ConditionTree) -> Self {
        self.push(TreeEntry::Nested {
            combinator: Combinator::And,
            tree,
        })
    }

    /// Nested tree whose entries are joined with OR.
    pub fn or(self, tree: ConditionTree) -> Self {
        self.push(TreeEntry::Nested {
            combinator: Combinator::Or,
            tree,
        })
    }

    /// Any of the given trees must hold.
    pub fn any(self, trees: Vec<ConditionTree>) -> Self {
        self.push(TreeEntry::Each {
            combinator: Combinator::Or,
            trees,
        })
    }
}

impl FieldCondition {
    /// Operator map with a single entry.
    pub fn op(op: FieldOp) -> Self {
        FieldCondition::Ops(vec![op])
    }
}

impl FieldOp {
    fn in_list<T: Into<Literal>>(values: Vec<T>, negated: bool) -> Self {
        FieldOp::In {
            values: values.into_iter().map(Into::into).collect(),
            negated,
        }
    }
}
