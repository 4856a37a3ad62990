//! Base table bootstrap and schema introspection.

use rusqlite::{params, Connection};
use sensus_core::constants::CONGREGANTS_TABLE;
use sensus_core::errors::StorageError;

use crate::errors::to_storage_err;

/// The base entity table. Not STRICT: declared types such as `BOOLEAN` and
/// `VARCHAR(n)` must be accepted, and widened columns keep values stored
/// under their earlier affinity.
pub const BOOTSTRAP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS congregants (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name TEXT NOT NULL,
    created_at INTEGER NOT NULL DEFAULT (unixepoch()),
    updated_at INTEGER NOT NULL DEFAULT (unixepoch())
);
"#;

/// Create the base table if it does not exist.
pub fn bootstrap(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(BOOTSTRAP_SQL).map_err(to_storage_err)?;
    tracing::debug!(table = CONGREGANTS_TABLE, "base table ready");
    Ok(())
}

/// One row of `pragma_table_info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub declared_type: String,
    pub not_null: bool,
    /// Default expression as SQL text, exactly as declared.
    pub default_sql: Option<String>,
    /// 1-based position within the primary key, 0 if not part of it.
    pub pk: i64,
}

/// Columns of `table` in declaration order. Empty if the table is missing.
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<ColumnInfo>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT name, type, \"notnull\", dflt_value, pk
             FROM pragma_table_info(?1) ORDER BY cid",
        )
        .map_err(to_storage_err)?;

    let rows = stmt
        .query_map(params![table], |row| {
            Ok(ColumnInfo {
                name: row.get(0)?,
                declared_type: row.get(1)?,
                not_null: row.get::<_, i64>(2)? != 0,
                default_sql: row.get(3)?,
                pk: row.get(4)?,
            })
        })
        .map_err(to_storage_err)?;

    rows.collect::<Result<Vec<_>, _>>().map_err(to_storage_err)
}

/// Column names of `table` in declaration order.
pub fn column_names(conn: &Connection, table: &str) -> Result<Vec<String>, StorageError> {
    Ok(table_columns(conn, table)?
        .into_iter()
        .map(|c| c.name)
        .collect())
}

pub fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool, StorageError> {
    Ok(table_columns(conn, table)?
        .iter()
        .any(|c| c.name.eq_ignore_ascii_case(column)))
}

pub fn table_exists(conn: &Connection, table: &str) -> Result<bool, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        params![table],
        |row| row.get::<_, i64>(0),
    )
    .map(|n| n > 0)
    .map_err(to_storage_err)
}
