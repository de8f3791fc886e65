//! Error types for sqlgen

use thiserror::Error;

/// Result type alias for sqlgen operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Error types for statement generation and execution.
///
/// Configuration mistakes (duplicate column mappings, colliding sigils) are
/// programmer errors and panic instead of surfacing here.
#[derive(Debug, Error)]
pub enum SqlError {
    /// A template consumed more placeholder arguments than were supplied
    #[error("Expecting argument #{expected}, got {supplied} arguments")]
    MissingArgument { expected: usize, supplied: usize },

    /// A key placeholder received a non-text argument
    #[error("Cannot splice argument #{ordinal} ({found}) into a key placeholder, need a text value")]
    KeyPlaceholder { ordinal: usize, found: &'static str },

    /// A value placeholder received an empty list
    #[error("Cannot expand empty list at argument #{ordinal}")]
    EmptyList { ordinal: usize },

    /// A zero value cannot be stored: the column forbids NULL and has no
    /// meaningful empty literal
    #[error("Column '{column}' holds an absent value but cannot store NULL")]
    ForbiddenNull { column: String },

    /// UPDATE with no non-primary-key columns
    #[error("Unable to build UPDATE on '{table}': no columns to set")]
    NothingToSet { table: String },

    /// UPDATE with no primary-key columns to match on
    #[error("Unable to build UPDATE on '{table}': no primary key columns to match")]
    NoPrimaryKey { table: String },

    /// UPDATE where a primary-key value renders as NULL
    #[error("Unable to build UPDATE clause with NULL key: {column}")]
    NullPrimaryKey { column: String },

    /// Save/auto-populate requires exactly one primary-key column
    #[error("{op} needs a record with exactly one 'pk' column")]
    SinglePrimaryKey { op: &'static str },

    /// Bulk insert called with no records
    #[error("Bulk insert needs at least one record")]
    EmptyBulk,

    /// Driver execution error, passed through opaquely
    #[error("Execution error: {0}")]
    Exec(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SqlError {
    /// Wrap a driver error for opaque pass-through.
    pub fn exec(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Exec(err.into())
    }

    /// Check if this is an argument error (recoverable by fixing the call)
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::MissingArgument { .. } | Self::KeyPlaceholder { .. } | Self::EmptyList { .. }
        )
    }

    /// Check if this is a statement-construction error
    pub fn is_statement_error(&self) -> bool {
        matches!(
            self,
            Self::ForbiddenNull { .. }
                | Self::NothingToSet { .. }
                | Self::NoPrimaryKey { .. }
                | Self::NullPrimaryKey { .. }
                | Self::SinglePrimaryKey { .. }
                | Self::EmptyBulk
        )
    }
}
