//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, NORMAL sync, 5s busy_timeout, foreign_keys ON, temp_store MEMORY.

use rusqlite::Connection;
use sensus_core::constants::BUSY_TIMEOUT_MS;
use sensus_core::errors::StorageError;

use crate::errors::to_storage_err;

/// Apply write-side pragmas.
pub fn apply_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA cache_size = -16000;
        PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};
        PRAGMA temp_store = MEMORY;
        "
    ))
    .map_err(to_storage_err)
}

/// Apply read-only pragmas to a pooled read connection.
pub fn apply_read_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(&format!(
        "
        PRAGMA query_only = ON;
        PRAGMA cache_size = -16000;
        PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};
        PRAGMA temp_store = MEMORY;
        "
    ))
    .map_err(to_storage_err)
}

/// Verify that WAL mode is active.
pub fn verify_wal_mode(conn: &Connection) -> Result<bool, StorageError> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(to_storage_err)?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}

/// Cheap round-trip proving the connection can read the schema.
/// Fails with `ConnectionFailed` for unopenable or non-database files.
pub fn probe(conn: &Connection) -> Result<(), StorageError> {
    conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| row.get::<_, i64>(0))
        .map(|_| ())
        .map_err(to_storage_err)
}
