//! Error types for querycraft

use std::time::Duration;
use thiserror::Error;

/// Result type alias for querycraft operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised while compiling or executing queries.
#[derive(Debug, Error)]
pub enum QueryError {
    /// An operator received the wrong number of operands
    #[error("Operator '{operator}' requires {expected}.")]
    Arity {
        operator: String,
        expected: &'static str,
    },

    /// An operand has the wrong shape for its operator
    #[error("Invalid operand for operator '{operator}': {message}")]
    InvalidOperand { operator: String, message: String },

    /// LIKE-family operator text that cannot be parsed
    #[error("Invalid operator '{0}'.")]
    InvalidOperator(String),

    /// Join entry without a join type or table
    #[error("{0}")]
    InvalidJoin(String),

    /// Dialect primitive the concrete dialect does not provide
    #[error("{dialect} does not support {feature}")]
    NotSupported {
        dialect: &'static str,
        feature: &'static str,
    },

    /// Malformed builder input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Placeholder referenced in SQL without a bound value
    #[error("Missing value for placeholder '{0}'")]
    MissingParam(String),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error from the bundled PostgreSQL executor
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Execution error reported by a custom executor
    #[error("Execution error: {0}")]
    Execution(String),

    /// Row decode error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),

    /// Query timeout error
    #[error("Query timeout after {0:?}")]
    Timeout(Duration),
}

impl QueryError {
    /// Create an arity error for an operator
    pub fn arity(operator: impl Into<String>, expected: &'static str) -> Self {
        Self::Arity {
            operator: operator.into(),
            expected,
        }
    }

    /// Create an invalid operand error for an operator
    pub fn invalid_operand(operator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOperand {
            operator: operator.into(),
            message: message.into(),
        }
    }

    /// Create a not-supported error for a dialect primitive
    pub fn not_supported(dialect: &'static str, feature: &'static str) -> Self {
        Self::NotSupported { dialect, feature }
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// Whether this error was raised while compiling a query (never retried).
    pub fn is_compile_error(&self) -> bool {
        matches!(
            self,
            Self::Arity { .. }
                | Self::InvalidOperand { .. }
                | Self::InvalidOperator(_)
                | Self::InvalidJoin(_)
                | Self::NotSupported { .. }
                | Self::Validation(_)
        )
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Convert a tokio_postgres error, keeping server-side details in the message.
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if err.is_closed() {
            return Self::Connection(err.to_string());
        }
        Self::Query(err)
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for QueryError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
