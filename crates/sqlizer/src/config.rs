use crate::log::SqlLogger;

/// How the condition parser treats operator tokens it does not recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownOperatorPolicy {
    /// Drop the token; it produces no SQL fragment.
    #[default]
    Skip,
    /// Fail with [`SqlizerError::UnknownOperator`](crate::SqlizerError::UnknownOperator).
    Reject,
}

/// How table and field names are turned into identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierPolicy {
    /// Wrap the name in backticks as-is.
    #[default]
    Verbatim,
    /// Require dotted `[A-Za-z_][A-Za-z0-9_$]*` parts; each part is backtick-quoted.
    Strict,
}

/// Configuration for [`Sqlizer`](crate::Sqlizer).
///
/// The default matches the permissive behaviour of [`build_statement`](crate::build_statement):
/// unknown operators are skipped, identifiers are quoted verbatim and nothing is logged.
#[derive(Debug, Clone, Default)]
pub struct SqlizerConfig {
    /// Unknown operator handling.
    pub unknown_operator: UnknownOperatorPolicy,
    /// Identifier handling.
    pub identifier_policy: IdentifierPolicy,
    /// Emit built statements through `tracing`. `None` disables statement logging.
    pub sql_logger: Option<SqlLogger>,
}

impl SqlizerConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unknown operator policy.
    pub fn unknown_operator(mut self, policy: UnknownOperatorPolicy) -> Self {
        self.unknown_operator = policy;
        self
    }

    /// Set the identifier policy.
    pub fn identifier_policy(mut self, policy: IdentifierPolicy) -> Self {
        self.identifier_policy = policy;
        self
    }

    /// Reject unknown operators and validate identifiers.
    pub fn strict(mut self) -> Self {
        self.unknown_operator = UnknownOperatorPolicy::Reject;
        self.identifier_policy = IdentifierPolicy::Strict;
        self
    }

    /// Log every built statement with the given logger.
    pub fn log_sql(mut self, logger: SqlLogger) -> Self {
        self.sql_logger = Some(logger);
        self
    }

    /// Disable statement logging.
    pub fn no_log(mut self) -> Self {
        self.sql_logger = None;
        self
    }
}
