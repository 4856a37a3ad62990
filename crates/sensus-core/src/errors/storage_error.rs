//! Storage errors.
//!
//! The variants mirror how failures propagate: `ConnectionFailed` is fatal and
//! bubbles to the caller untouched, `DuplicateDefinition` is an expected
//! outcome of re-running schema evolution, `OperationFailed` is absorbed at the
//! granularity of one column spec or one metric, and `MalformedValue` never
//! leaves the place that read the offending cell.

use super::error_code::{self, SensusErrorCode};

/// Errors raised by the SQLite store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Cannot reach store: {message}")]
    ConnectionFailed { message: String },

    #[error("Column {table}.{column} already exists")]
    DuplicateDefinition { table: String, column: String },

    #[error("{operation} failed: {message}")]
    OperationFailed { operation: String, message: String },

    #[error("Malformed value in column {column}: {message}")]
    MalformedValue { column: String, message: String },

    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Database busy")]
    DbBusy,
}

impl StorageError {
    /// Returns true for errors that mean the store cannot be reached at all.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Self::ConnectionFailed { .. })
    }
}

impl SensusErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConnectionFailed { .. } => error_code::CONNECTION_FAILED,
            Self::DuplicateDefinition { .. } => error_code::DUPLICATE_DEFINITION,
            Self::OperationFailed { .. } => error_code::OPERATION_FAILED,
            Self::MalformedValue { .. } => error_code::MALFORMED_VALUE,
            Self::SqliteError { .. } => error_code::STORAGE_ERROR,
            Self::DbBusy => error_code::DB_BUSY,
        }
    }
}
