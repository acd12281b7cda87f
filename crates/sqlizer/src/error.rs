//! Error types for sqlizer

use thiserror::Error;

/// Result type alias for sqlizer operations
pub type SqlizerResult<T> = Result<T, SqlizerError>;

/// Errors raised while turning a query description into SQL.
///
/// Every error aborts statement construction; no partial SQL is ever returned.
#[derive(Debug, Error)]
pub enum SqlizerError {
    /// Misconfigured query or helper input (missing table, conflicting options, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Condition tree has a shape the compiler cannot express
    #[error("Invalid condition: {0}")]
    InvalidCondition(String),

    /// Operator token not recognised (only raised under the reject policy)
    #[error("Unknown operator '{0}'")]
    UnknownOperator(String),

    /// Identifier rejected by the strict identifier policy
    #[error("Validation error: {0}")]
    Validation(String),

    /// Result row decode error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Unparseable datetime input
    #[error("Datetime error: {0}")]
    DateTime(String),

    /// Query description could not be deserialized
    #[error("Deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SqlizerError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid condition error
    pub fn invalid_condition(message: impl Into<String>) -> Self {
        Self::InvalidCondition(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this error came from a malformed or unknown condition
    pub fn is_condition(&self) -> bool {
        matches!(self, Self::InvalidCondition(_) | Self::UnknownOperator(_))
    }
}
