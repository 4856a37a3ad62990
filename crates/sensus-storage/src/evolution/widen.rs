//! Type widening by table rebuild.
//!
//! SQLite cannot change a column's declared type in place. The table is
//! rebuilt inside one transaction: shadow table with the widened
//! declaration, row copy, drop, rename, index re-creation. Stored values are
//! copied as-is and take the new column's affinity (an integer flag `1`
//! becomes the text `'1'` when widened to TEXT).

use rusqlite::{params, Connection, OptionalExtension};
use sensus_core::errors::StorageError;
use sensus_core::types::{ColumnSpec, EvolutionOutcome, SemanticType};

use crate::errors::{classify_ddl_error, to_storage_err};
use crate::schema::{self, ColumnInfo};

pub(super) fn widen_column(
    conn: &Connection,
    spec: &ColumnSpec,
) -> Result<EvolutionOutcome, StorageError> {
    let fail = |message: String| StorageError::OperationFailed {
        operation: spec.to_string(),
        message,
    };

    let columns = schema::table_columns(conn, spec.table())?;
    if columns.is_empty() {
        return Err(fail(format!("no such table: {}", spec.table())));
    }
    let current = columns
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(spec.column()))
        .ok_or_else(|| fail(format!("no such column: {}", spec.column())))?;

    let target = spec.semantic_type();
    if current.declared_type.eq_ignore_ascii_case(&target.sql_type()) {
        return Ok(EvolutionOutcome::AlreadyPresent);
    }

    match SemanticType::from_declared(&current.declared_type) {
        Some(from) if from.widens_to(&target) => {}
        Some(from) => {
            return Err(fail(format!("{from} -> {target} is not a widening")));
        }
        None if target == SemanticType::Text => {}
        None => {
            return Err(fail(format!(
                "cannot widen unrecognized type {:?} to {target}",
                current.declared_type
            )));
        }
    }

    rebuild_table(conn, spec, &columns, &target.sql_type())?;
    Ok(EvolutionOutcome::Applied)
}

fn rebuild_table(
    conn: &Connection,
    spec: &ColumnSpec,
    columns: &[ColumnInfo],
    new_type: &str,
) -> Result<(), StorageError> {
    let table = spec.table();
    let shadow = format!("{table}__widen");
    let ddl_err = |e: rusqlite::Error| classify_ddl_error(&e, spec);

    // RAII transaction: rolls back on any early return.
    let tx = conn.unchecked_transaction().map_err(to_storage_err)?;

    let create_sql: String = tx
        .query_row(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![table],
            |row| row.get(0),
        )
        .map_err(to_storage_err)?;
    let autoincrement = create_sql.to_ascii_uppercase().contains("AUTOINCREMENT");

    let index_sql: Vec<String> = {
        let mut stmt = tx
            .prepare(
                "SELECT sql FROM sqlite_master
                 WHERE type = 'index' AND tbl_name = ?1 AND sql IS NOT NULL",
            )
            .map_err(to_storage_err)?;
        let rows = stmt
            .query_map(params![table], |row| row.get(0))
            .map_err(to_storage_err)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(to_storage_err)?
    };

    let sequence: Option<i64> = if autoincrement {
        tx.query_row(
            "SELECT seq FROM sqlite_sequence WHERE name = ?1",
            params![table],
            |row| row.get(0),
        )
        .optional()
        .map_err(to_storage_err)?
    } else {
        None
    };

    let pk_columns: Vec<&ColumnInfo> = {
        let mut pk: Vec<&ColumnInfo> = columns.iter().filter(|c| c.pk > 0).collect();
        pk.sort_by_key(|c| c.pk);
        pk
    };
    let single_pk = pk_columns.len() == 1;

    let mut defs: Vec<String> = columns
        .iter()
        .map(|c| {
            let declared = if c.name.eq_ignore_ascii_case(spec.column()) {
                new_type
            } else {
                c.declared_type.as_str()
            };
            let mut def = format!("\"{}\" {declared}", c.name);
            if single_pk && c.pk > 0 {
                def.push_str(" PRIMARY KEY");
                if autoincrement {
                    def.push_str(" AUTOINCREMENT");
                }
            }
            if c.not_null {
                def.push_str(" NOT NULL");
            }
            if let Some(default) = &c.default_sql {
                def.push_str(&format!(" DEFAULT ({default})"));
            }
            def
        })
        .collect();
    if pk_columns.len() > 1 {
        let keys: Vec<String> = pk_columns.iter().map(|c| format!("\"{}\"", c.name)).collect();
        defs.push(format!("PRIMARY KEY ({})", keys.join(", ")));
    }

    let column_list: Vec<String> = columns.iter().map(|c| format!("\"{}\"", c.name)).collect();
    let column_list = column_list.join(", ");

    tx.execute_batch(&format!(
        "DROP TABLE IF EXISTS \"{shadow}\";
         CREATE TABLE \"{shadow}\" ({defs});
         INSERT INTO \"{shadow}\" ({column_list}) SELECT {column_list} FROM \"{table}\";
         DROP TABLE \"{table}\";
         ALTER TABLE \"{shadow}\" RENAME TO \"{table}\";",
        defs = defs.join(", "),
    ))
    .map_err(ddl_err)?;

    for sql in &index_sql {
        tx.execute_batch(sql).map_err(ddl_err)?;
    }

    if let Some(seq) = sequence {
        let updated = tx
            .execute(
                "UPDATE sqlite_sequence SET seq = MAX(seq, ?1) WHERE name = ?2",
                params![seq, table],
            )
            .map_err(to_storage_err)?;
        if updated == 0 {
            tx.execute(
                "INSERT INTO sqlite_sequence (name, seq) VALUES (?1, ?2)",
                params![table, seq],
            )
            .map_err(to_storage_err)?;
        }
    }

    tx.commit().map_err(to_storage_err)?;
    tracing::debug!(table, column = spec.column(), new_type, "table rebuilt for widening");
    Ok(())
}
