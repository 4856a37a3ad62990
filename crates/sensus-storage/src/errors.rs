//! Mapping from `rusqlite` errors onto the storage error taxonomy.

use rusqlite::ErrorCode;
use sensus_core::errors::StorageError;
use sensus_core::types::ColumnSpec;

/// Error codes that mean the store itself is unreachable or unusable.
fn is_connection_code(code: ErrorCode) -> bool {
    matches!(
        code,
        ErrorCode::CannotOpen | ErrorCode::NotADatabase | ErrorCode::SystemIoFailure
    )
}

/// Generic conversion for reads and non-DDL writes.
pub fn to_storage_err(e: rusqlite::Error) -> StorageError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _) if is_connection_code(err.code) => {
            StorageError::ConnectionFailed {
                message: e.to_string(),
            }
        }
        rusqlite::Error::SqliteFailure(err, _)
            if matches!(err.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) =>
        {
            StorageError::DbBusy
        }
        _ => StorageError::SqliteError {
            message: e.to_string(),
        },
    }
}

/// Classify a failed DDL statement issued for `spec`.
///
/// SQLite reports an existing column as a generic `SQLITE_ERROR` whose
/// message starts with "duplicate column name"; the message is the only
/// signal available.
pub fn classify_ddl_error(e: &rusqlite::Error, spec: &ColumnSpec) -> StorageError {
    if let rusqlite::Error::SqliteFailure(err, message) = e {
        let text = message.as_deref().unwrap_or_default().to_ascii_lowercase();
        if text.contains("duplicate column name") {
            return StorageError::DuplicateDefinition {
                table: spec.table().to_string(),
                column: spec.column().to_string(),
            };
        }
        if is_connection_code(err.code) {
            return StorageError::ConnectionFailed {
                message: e.to_string(),
            };
        }
    }
    StorageError::OperationFailed {
        operation: spec.to_string(),
        message: e.to_string(),
    }
}
