//! ReadSession: one consistent read over the congregant table.
//!
//! Every metric of a report runs inside the same deferred read transaction,
//! against a column set snapshotted when the session starts. Columns that do
//! not exist yet read as all-null.

use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection, Transaction, TransactionBehavior};
use rustc_hash::{FxHashMap, FxHashSet};
use sensus_core::errors::StorageError;
use sensus_core::types::{GroupCount, TagCount, TagSet};

use super::filter::Filter;
use crate::errors::to_storage_err;
use crate::schema;

pub struct ReadSession<'c> {
    conn: &'c Connection,
    table: &'static str,
    columns: FxHashSet<String>,
    table_exists: bool,
    // Held for its Drop: ends the read transaction.
    _tx: Option<Transaction<'c>>,
}

impl<'c> ReadSession<'c> {
    /// Start a read transaction (unless the caller already holds one) and
    /// snapshot the table's columns.
    pub fn begin(conn: &'c Connection, table: &'static str) -> Result<Self, StorageError> {
        let tx = if conn.is_autocommit() {
            Some(
                Transaction::new_unchecked(conn, TransactionBehavior::Deferred)
                    .map_err(to_storage_err)?,
            )
        } else {
            None
        };
        let table_exists = schema::table_exists(conn, table)?;
        let columns = schema::column_names(conn, table)?
            .into_iter()
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Ok(Self {
            conn,
            table,
            columns,
            table_exists,
            _tx: tx,
        })
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(&column.to_ascii_lowercase())
    }

    /// Number of records matching `filter` (all records when `None`).
    pub fn count(&self, filter: Option<&Filter>) -> Result<u64, StorageError> {
        if !self.table_exists {
            return Ok(0);
        }
        let (where_sql, params) = match filter {
            Some(f) if !self.has_column(f.column()) => return Ok(0),
            Some(f) => {
                let (sql, params) = f.to_sql();
                (format!(" WHERE {sql}"), params)
            }
            None => (String::new(), Vec::new()),
        };
        let sql = format!("SELECT COUNT(*) FROM \"{}\"{where_sql}", self.table);
        let n: i64 = self
            .conn
            .query_row(&sql, params_from_iter(params), |row| row.get(0))
            .map_err(to_storage_err)?;
        Ok(n.max(0) as u64)
    }

    /// Exact integer sum of `column`. Nulls count as zero; cells that are
    /// not whole numbers are skipped.
    pub fn sum(&self, column: &str) -> Result<i64, StorageError> {
        if !self.table_exists || !self.has_column(column) {
            return Ok(0);
        }
        let sql = format!(
            "SELECT \"{column}\" FROM \"{}\" WHERE \"{column}\" IS NOT NULL",
            self.table
        );
        let mut stmt = self.conn.prepare(&sql).map_err(to_storage_err)?;
        let mut rows = stmt.query([]).map_err(to_storage_err)?;

        let mut total: i64 = 0;
        let mut malformed = 0usize;
        while let Some(row) = rows.next().map_err(to_storage_err)? {
            let cell = row.get_ref(0).map_err(to_storage_err)?;
            let Some(value) = whole_number(cell) else {
                malformed += 1;
                continue;
            };
            total = total
                .checked_add(value)
                .ok_or_else(|| StorageError::OperationFailed {
                    operation: format!("sum {column}"),
                    message: "integer overflow".to_string(),
                })?;
        }
        if malformed > 0 {
            let e = StorageError::MalformedValue {
                column: column.to_string(),
                message: format!("{malformed} non-integer cells skipped"),
            };
            tracing::debug!(error = %e, "sum ignored malformed cells");
        }
        Ok(total)
    }

    /// Count per distinct trimmed value of `column` among records matching
    /// `filter`.
    ///
    /// Order: `vocabulary` entries first (zero counts kept), then other
    /// observed values by count descending and label, then the null/empty
    /// bucket, which is always present.
    pub fn group_by(
        &self,
        column: &str,
        filter: Option<&Filter>,
        vocabulary: &[&str],
    ) -> Result<Vec<GroupCount>, StorageError> {
        let mut observed: FxHashMap<String, u64> = FxHashMap::default();
        let mut null_count = 0u64;

        if self.has_column(column) {
            let (where_sql, params) = match filter {
                Some(f) if !self.has_column(f.column()) => {
                    return Ok(assemble(observed, 0, vocabulary));
                }
                Some(f) => {
                    let (sql, params) = f.to_sql();
                    (format!(" WHERE {sql}"), params)
                }
                None => (String::new(), Vec::new()),
            };
            let sql = format!(
                "SELECT NULLIF(TRIM(CAST(\"{column}\" AS TEXT)), '') AS bucket, COUNT(*)
                 FROM \"{}\"{where_sql} GROUP BY bucket",
                self.table
            );
            let mut stmt = self.conn.prepare(&sql).map_err(to_storage_err)?;
            let rows = stmt
                .query_map(params_from_iter(params), |row| {
                    Ok((row.get::<_, Option<String>>(0)?, row.get::<_, i64>(1)?))
                })
                .map_err(to_storage_err)?;
            for row in rows {
                let (bucket, n) = row.map_err(to_storage_err)?;
                let n = n.max(0) as u64;
                match bucket {
                    Some(label) => *observed.entry(label).or_insert(0) += n,
                    None => null_count += n,
                }
            }
        } else {
            null_count = self.count(filter)?;
        }

        Ok(assemble(observed, null_count, vocabulary))
    }

    /// Occurrences of each tag across `columns` of every record, most
    /// frequent first; ties keep first-seen order.
    ///
    /// Tags are compared exactly as stored: `" A"` and `"A"` count
    /// separately. Only whitespace-only tags are skipped.
    pub fn tag_frequency(&self, columns: &[&str]) -> Result<Vec<TagCount>, StorageError> {
        let present: Vec<&str> = columns
            .iter()
            .copied()
            .filter(|c| self.has_column(c))
            .collect();
        if !self.table_exists || present.is_empty() {
            return Ok(Vec::new());
        }

        let select: Vec<String> = present.iter().map(|c| format!("\"{c}\"")).collect();
        let sql = format!(
            "SELECT {} FROM \"{}\" ORDER BY id ASC",
            select.join(", "),
            self.table
        );
        let mut stmt = self.conn.prepare(&sql).map_err(to_storage_err)?;
        let mut rows = stmt.query([]).map_err(to_storage_err)?;

        let mut counts: Vec<TagCount> = Vec::new();
        let mut index: FxHashMap<String, usize> = FxHashMap::default();
        while let Some(row) = rows.next().map_err(to_storage_err)? {
            for (idx, column) in present.iter().enumerate() {
                let tags = match row.get_ref(idx).map_err(to_storage_err)? {
                    ValueRef::Null => continue,
                    ValueRef::Text(raw) => match std::str::from_utf8(raw) {
                        Ok(s) => TagSet::parse_lenient(s),
                        Err(_) => continue,
                    },
                    _ => {
                        tracing::debug!(column, "non-text tag set treated as empty");
                        continue;
                    }
                };
                for tag in tags.non_blank() {
                    match index.get(tag) {
                        Some(&i) => counts[i].frequency += 1,
                        None => {
                            index.insert(tag.to_string(), counts.len());
                            counts.push(TagCount {
                                tag: tag.to_string(),
                                frequency: 1,
                            });
                        }
                    }
                }
            }
        }

        // sort_by is stable: equal frequencies stay in first-seen order.
        counts.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        Ok(counts)
    }
}

fn assemble(
    mut observed: FxHashMap<String, u64>,
    null_count: u64,
    vocabulary: &[&str],
) -> Vec<GroupCount> {
    let mut groups: Vec<GroupCount> = vocabulary
        .iter()
        .map(|label| GroupCount {
            category: Some(label.to_string()),
            count: observed.remove(*label).unwrap_or(0),
        })
        .collect();

    let mut extras: Vec<(String, u64)> = observed.into_iter().collect();
    extras.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    groups.extend(extras.into_iter().map(|(label, count)| GroupCount {
        category: Some(label),
        count,
    }));

    groups.push(GroupCount {
        category: None,
        count: null_count,
    });
    groups
}

/// Integer cells, integral reals, and integer-looking text.
fn whole_number(cell: ValueRef<'_>) -> Option<i64> {
    match cell {
        ValueRef::Integer(i) => Some(i),
        ValueRef::Real(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(f as i64),
        ValueRef::Text(raw) => std::str::from_utf8(raw).ok()?.trim().parse().ok(),
        _ => None,
    }
}
