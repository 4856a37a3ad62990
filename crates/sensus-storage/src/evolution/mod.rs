//! Additive, idempotent schema evolution.
//!
//! Column specs are applied strictly in input order, one outcome per spec.
//! A column that already exists is a success (`AlreadyPresent`), any other
//! per-spec failure is recorded as `Failed` and the run moves on. Only a
//! store that cannot be reached at all aborts the run.

pub mod history;
pub mod v001_registration;
pub mod v002_locality;
pub mod v003_socioeconomic;
pub mod v004_education_health;
pub mod v005_tags;
pub mod v006_assistance;
pub mod v007_widen_flags;
mod widen;

use std::path::Path;
use std::time::Instant;

use rusqlite::Connection;
use sensus_core::errors::StorageError;
use sensus_core::types::{ColumnOp, ColumnSpec, EvolutionOutcome, EvolutionSummary};

use crate::connection::pragmas::{apply_pragmas, probe};
use crate::errors::classify_ddl_error;
use crate::schema;

/// Open a dedicated connection to `path` and apply `specs`.
///
/// The connection lives for exactly this call and is closed on every exit
/// path. An unreachable store yields `ConnectionFailed` and no outcomes.
pub fn apply(path: &Path, specs: &[ColumnSpec]) -> Result<Vec<EvolutionOutcome>, StorageError> {
    let conn = Connection::open(path).map_err(|e| StorageError::ConnectionFailed {
        message: format!("{}: {e}", path.display()),
    })?;
    probe(&conn)?;
    apply_pragmas(&conn)?;
    schema::bootstrap(&conn)?;
    apply_with(&conn, specs)
}

/// Apply `specs` on an existing connection.
pub fn apply_with(
    conn: &Connection,
    specs: &[ColumnSpec],
) -> Result<Vec<EvolutionOutcome>, StorageError> {
    probe(conn)?;

    let start = Instant::now();
    let mut outcomes = Vec::with_capacity(specs.len());

    for (index, spec) in specs.iter().enumerate() {
        let outcome = match apply_one(conn, index, spec) {
            Ok(outcome) => outcome,
            Err(StorageError::DuplicateDefinition { .. }) => EvolutionOutcome::AlreadyPresent,
            Err(e) if e.is_connection_failure() => {
                tracing::error!(
                    spec_index = index,
                    table = spec.table(),
                    column = spec.column(),
                    error = %e,
                    "store unreachable, aborting schema evolution"
                );
                return Err(e);
            }
            Err(e) => EvolutionOutcome::Failed(e.to_string()),
        };

        match &outcome {
            EvolutionOutcome::Applied => tracing::info!(
                spec_index = index,
                table = spec.table(),
                column = spec.column(),
                "applied {spec}"
            ),
            EvolutionOutcome::AlreadyPresent => tracing::debug!(
                spec_index = index,
                table = spec.table(),
                column = spec.column(),
                "already present"
            ),
            EvolutionOutcome::Failed(reason) => tracing::warn!(
                spec_index = index,
                table = spec.table(),
                column = spec.column(),
                reason = %reason,
                "column spec failed"
            ),
        }
        outcomes.push(outcome);
    }

    let summary = EvolutionSummary::from_outcomes(&outcomes);
    tracing::info!(
        applied = summary.applied,
        already_present = summary.already_present,
        failed = summary.failed,
        duration_ms = start.elapsed().as_millis() as u64,
        "schema evolution finished"
    );

    Ok(outcomes)
}

fn apply_one(
    conn: &Connection,
    index: usize,
    spec: &ColumnSpec,
) -> Result<EvolutionOutcome, StorageError> {
    if let Some(ident) = spec.invalid_identifier() {
        return Err(StorageError::OperationFailed {
            operation: spec.to_string(),
            message: format!("invalid identifier {ident:?}"),
        });
    }
    match spec.op() {
        ColumnOp::Add => add_column(conn, index, spec),
        ColumnOp::Widen => widen::widen_column(conn, spec),
    }
}

/// `ALTER TABLE ... ADD COLUMN`.
///
/// SQLite always appends, so the "after" hint cannot move the column. A
/// missing anchor is logged and the column is still added.
fn add_column(
    conn: &Connection,
    index: usize,
    spec: &ColumnSpec,
) -> Result<EvolutionOutcome, StorageError> {
    let columns = schema::column_names(conn, spec.table())?;
    if columns.iter().any(|c| c.eq_ignore_ascii_case(spec.column())) {
        return Ok(EvolutionOutcome::AlreadyPresent);
    }
    if let Some(anchor) = spec.after_column() {
        if !columns.is_empty() && !columns.iter().any(|c| c.eq_ignore_ascii_case(anchor)) {
            tracing::warn!(
                spec_index = index,
                table = spec.table(),
                column = spec.column(),
                anchor,
                "placement anchor missing, appending column"
            );
        }
    }

    let sql = format!(
        "ALTER TABLE \"{}\" ADD COLUMN {}",
        spec.table(),
        spec.column_definition()
    );
    conn.execute_batch(&sql)
        .map_err(|e| classify_ddl_error(&e, spec))?;
    Ok(EvolutionOutcome::Applied)
}
