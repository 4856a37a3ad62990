//! Registration and in-place updates of congregant records.
//!
//! These require the cumulative release history to have been applied.
//! Records are never deleted.

use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension, Row};
use sensus_core::errors::StorageError;
use sensus_core::reference::is_truthy_flag;
use sensus_core::types::{CongregantRecord, FlagAnswer, TagSet};

use crate::errors::to_storage_err;

/// Data columns in the order bound by `insert_congregant` / `update_congregant`.
const DATA_COLUMNS: &[&str] = &[
    "full_name",
    "gender",
    "birth_date",
    "birth_place",
    "marital_status",
    "phone",
    "email",
    "address",
    "sector",
    "lingkungan",
    "rayon",
    "household_size",
    "children_count",
    "job_category",
    "job_title",
    "income_bracket",
    "owns_business",
    "business_type",
    "education_level",
    "health_insurance",
    "has_disability",
    "chronic_conditions",
    "interest_areas",
    "contribution_types",
    "disability_types",
    "family_chronic_conditions",
    "children_schooling",
    "receives_assistance",
    "assistance_type",
    "notes",
];

/// Register a congregant. Returns the store-assigned id.
pub fn insert_congregant(conn: &Connection, r: &CongregantRecord) -> Result<i64, StorageError> {
    let placeholders: Vec<String> = (1..=DATA_COLUMNS.len()).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "INSERT INTO congregants ({}) VALUES ({})",
        DATA_COLUMNS.join(", "),
        placeholders.join(", ")
    );
    let mut stmt = conn.prepare_cached(&sql).map_err(to_storage_err)?;
    stmt.execute(params![
        r.full_name,
        r.gender,
        r.birth_date,
        r.birth_place,
        r.marital_status,
        r.phone,
        r.email,
        r.address,
        r.sector,
        r.lingkungan,
        r.rayon,
        r.household_size.unwrap_or(1),
        r.children_count.unwrap_or(0),
        r.job_category,
        r.job_title,
        r.income_bracket,
        r.owns_business.as_str(),
        r.business_type,
        r.education_level,
        r.health_insurance,
        r.has_disability as i64,
        r.chronic_conditions.to_json(),
        r.interest_areas.to_json(),
        r.contribution_types.to_json(),
        r.disability_types.to_json(),
        r.family_chronic_conditions.to_json(),
        r.children_schooling.to_json(),
        r.receives_assistance.as_str(),
        r.assistance_type,
        r.notes,
    ])
    .map_err(to_storage_err)?;
    Ok(conn.last_insert_rowid())
}

/// Overwrite every data column of record `id`. Returns false if no such id.
pub fn update_congregant(
    conn: &Connection,
    id: i64,
    r: &CongregantRecord,
) -> Result<bool, StorageError> {
    let assignments: Vec<String> = DATA_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{c} = ?{}", i + 1))
        .collect();
    let sql = format!(
        "UPDATE congregants SET {}, updated_at = unixepoch() WHERE id = ?{}",
        assignments.join(", "),
        DATA_COLUMNS.len() + 1
    );
    let mut stmt = conn.prepare_cached(&sql).map_err(to_storage_err)?;
    let changed = stmt
        .execute(params![
            r.full_name,
            r.gender,
            r.birth_date,
            r.birth_place,
            r.marital_status,
            r.phone,
            r.email,
            r.address,
            r.sector,
            r.lingkungan,
            r.rayon,
            r.household_size.unwrap_or(1),
            r.children_count.unwrap_or(0),
            r.job_category,
            r.job_title,
            r.income_bracket,
            r.owns_business.as_str(),
            r.business_type,
            r.education_level,
            r.health_insurance,
            r.has_disability as i64,
            r.chronic_conditions.to_json(),
            r.interest_areas.to_json(),
            r.contribution_types.to_json(),
            r.disability_types.to_json(),
            r.family_chronic_conditions.to_json(),
            r.children_schooling.to_json(),
            r.receives_assistance.as_str(),
            r.assistance_type,
            r.notes,
            id,
        ])
        .map_err(to_storage_err)?;
    Ok(changed == 1)
}

/// Fetch one record. Tag sets that fail to parse read back empty.
pub fn get_congregant(conn: &Connection, id: i64) -> Result<Option<CongregantRecord>, StorageError> {
    let sql = format!(
        "SELECT id, created_at, updated_at, {} FROM congregants WHERE id = ?1",
        DATA_COLUMNS.join(", ")
    );
    let mut stmt = conn.prepare_cached(&sql).map_err(to_storage_err)?;
    stmt.query_row(params![id], read_record)
        .optional()
        .map_err(to_storage_err)
}

/// Count registered congregants.
pub fn count_congregants(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM congregants", [], |row| row.get(0))
        .map_err(to_storage_err)
}

/// All record ids in registration order.
pub fn list_ids(conn: &Connection) -> Result<Vec<i64>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT id FROM congregants ORDER BY id ASC")
        .map_err(to_storage_err)?;
    let rows = stmt.query_map([], |row| row.get(0)).map_err(to_storage_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(to_storage_err)
}

fn read_record(row: &Row<'_>) -> rusqlite::Result<CongregantRecord> {
    Ok(CongregantRecord {
        id: Some(row.get(0)?),
        created_at: row.get(1)?,
        updated_at: row.get(2)?,
        full_name: text(row, 3)?.unwrap_or_default(),
        gender: text(row, 4)?,
        birth_date: text(row, 5)?,
        birth_place: text(row, 6)?,
        marital_status: text(row, 7)?,
        phone: text(row, 8)?,
        email: text(row, 9)?,
        address: text(row, 10)?,
        sector: text(row, 11)?,
        lingkungan: text(row, 12)?,
        rayon: text(row, 13)?,
        household_size: integer(row, 14)?,
        children_count: integer(row, 15)?,
        job_category: text(row, 16)?,
        job_title: text(row, 17)?,
        income_bracket: text(row, 18)?,
        owns_business: answer(row, 19)?,
        business_type: text(row, 20)?,
        education_level: text(row, 21)?,
        health_insurance: text(row, 22)?,
        has_disability: flag(row, 23)?,
        chronic_conditions: tags(row, 24)?,
        interest_areas: tags(row, 25)?,
        contribution_types: tags(row, 26)?,
        disability_types: tags(row, 27)?,
        family_chronic_conditions: tags(row, 28)?,
        children_schooling: tags(row, 29)?,
        receives_assistance: answer(row, 30)?,
        assistance_type: text(row, 31)?,
        notes: text(row, 32)?,
    })
}

/// Text cell, rendering numbers stored under an older affinity.
fn text(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) | ValueRef::Blob(t) => Some(String::from_utf8_lossy(t).into_owned()),
    })
}

fn integer(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<i64>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Integer(i) => Some(i),
        ValueRef::Text(t) => std::str::from_utf8(t).ok().and_then(|s| s.trim().parse().ok()),
        _ => None,
    })
}

/// Flag cell: `1`, or a truthy answer after the text widening.
fn flag(row: &Row<'_>, idx: usize) -> rusqlite::Result<bool> {
    Ok(text(row, idx)?.is_some_and(|v| is_truthy_flag(&v)))
}

/// Widened flag cell, kept as stored. NULL reads as the column default.
fn answer(row: &Row<'_>, idx: usize) -> rusqlite::Result<FlagAnswer> {
    Ok(text(row, idx)?.map(FlagAnswer::from_text).unwrap_or_default())
}

fn tags(row: &Row<'_>, idx: usize) -> rusqlite::Result<TagSet> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Text(t) => std::str::from_utf8(t)
            .map(TagSet::parse_lenient)
            .unwrap_or_default(),
        _ => TagSet::default(),
    })
}
