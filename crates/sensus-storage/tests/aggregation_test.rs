//! Census aggregation: null safety, completeness, tag counting, and
//! degradation of individual metrics.

use rusqlite::{params, Connection};
use sensus_core::types::{ColumnSpec, GroupCount, MetricValue, SemanticType, TagCount};
use sensus_storage::aggregation;
use sensus_storage::evolution::{self, history};
use sensus_storage::schema;

fn evolved() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    schema::bootstrap(&conn).unwrap();
    evolution::apply_with(&conn, &history::cumulative()).unwrap();
    conn
}

fn insert(conn: &Connection, column: &str, value: Option<&str>) {
    conn.execute(
        &format!("INSERT INTO congregants (full_name, {column}) VALUES ('x', ?1)"),
        params![value],
    )
    .unwrap();
}

fn tag(name: &str, frequency: u64) -> TagCount {
    TagCount {
        tag: name.to_string(),
        frequency,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Report shape
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn empty_store_yields_complete_zero_report() {
    let conn = evolved();
    let report = aggregation::summarize(&conn).unwrap();

    assert!(!report.is_degraded());
    for name in aggregation::metric_names() {
        assert!(report.get(name).is_some(), "missing metric {name}");
    }
    assert_eq!(report.count("total_congregants"), Some(0));
    assert_eq!(report.sum("total_household_members"), Some(0));
    assert_eq!(report.tags("interest_areas"), Some(&[][..]));
    assert_eq!(report.group_count("by_sector", Some("Sektor 1")), Some(0));
    assert_eq!(report.group_count("by_sector", None), Some(0));
}

#[test]
fn store_without_evolved_columns_still_reports_everything() {
    let conn = Connection::open_in_memory().unwrap();
    schema::bootstrap(&conn).unwrap();
    for name in ["Yohanes", "Paulus", "Lidia"] {
        conn.execute("INSERT INTO congregants (full_name) VALUES (?1)", params![name])
            .unwrap();
    }

    let report = aggregation::summarize(&conn).unwrap();

    assert!(!report.is_degraded(), "{:?}", report.degraded);
    assert_eq!(report.metrics.len(), aggregation::metric_names().len());
    assert_eq!(report.count("total_congregants"), Some(3));
    assert_eq!(report.sum("total_household_members"), Some(0));
    assert_eq!(report.count("professional_count"), Some(0));
    assert_eq!(report.count("business_owner_count"), Some(0));
    // Every record lands in the null bucket.
    assert_eq!(report.group_count("by_sector", None), Some(3));
    assert_eq!(report.group_count("by_sector", Some("Sektor 6")), Some(0));
    assert_eq!(report.group_count("business_type_among_owners", None), Some(0));
    assert!(report.tags("chronic_diseases").unwrap().is_empty());
}

#[test]
fn report_on_missing_table_is_all_zero() {
    let conn = Connection::open_in_memory().unwrap();
    let report = aggregation::summarize(&conn).unwrap();
    assert_eq!(report.count("total_congregants"), Some(0));
    assert_eq!(report.group_count("by_gender", None), Some(0));
    assert!(!report.is_degraded());
}

// ═══════════════════════════════════════════════════════════════════════════
// Sums
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn sum_over_all_null_column_is_zero() {
    let conn = Connection::open_in_memory().unwrap();
    schema::bootstrap(&conn).unwrap();
    let spec = ColumnSpec::add("congregants", "household_size", SemanticType::Integer);
    evolution::apply_with(&conn, &[spec]).unwrap();
    for _ in 0..4 {
        insert(&conn, "household_size", None);
    }

    let report = aggregation::summarize(&conn).unwrap();
    assert_eq!(report.sum("total_household_members"), Some(0));
    assert!(!report.is_degraded());
}

#[test]
fn sum_skips_non_integer_cells() {
    let conn = evolved();
    for value in ["3", "4", "2.0", "2.5", "banyak"] {
        insert(&conn, "household_size", Some(value));
    }
    let report = aggregation::summarize(&conn).unwrap();
    assert_eq!(report.sum("total_household_members"), Some(9));
}

#[test]
fn overflowing_sum_degrades_only_that_metric() {
    let conn = evolved();
    for _ in 0..2 {
        conn.execute(
            "INSERT INTO congregants (full_name, household_size, children_count) VALUES ('x', ?1, 2)",
            params![i64::MAX],
        )
        .unwrap();
    }

    let report = aggregation::summarize(&conn).unwrap();

    assert_eq!(report.degraded, vec!["total_household_members".to_string()]);
    assert_eq!(report.sum("total_household_members"), Some(0));
    assert_eq!(report.sum("total_children"), Some(4));
    assert_eq!(report.count("total_congregants"), Some(2));
}

// ═══════════════════════════════════════════════════════════════════════════
// Group-by
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn group_by_accounts_for_every_record() {
    let conn = evolved();
    for value in [
        Some("Sektor 2"),
        Some("Sektor 2"),
        Some(" Sektor 5 "),
        None,
        Some("  "),
        Some("Stasi Baru"),
    ] {
        insert(&conn, "sector", value);
    }

    let report = aggregation::summarize(&conn).unwrap();
    let groups = report.groups("by_sector").unwrap();

    let total: u64 = groups.iter().map(|g| g.count).sum();
    assert_eq!(total, 6);
    assert_eq!(report.group_count("by_sector", Some("Sektor 2")), Some(2));
    assert_eq!(report.group_count("by_sector", Some("Sektor 5")), Some(1));
    assert_eq!(report.group_count("by_sector", None), Some(2));

    // Vocabulary first, then unknown values, null bucket last.
    assert_eq!(groups[0].category.as_deref(), Some("Sektor 1"));
    assert_eq!(groups[6].category.as_deref(), Some("Stasi Baru"));
    assert_eq!(groups.last(), Some(&GroupCount { category: None, count: 2 }));
}

#[test]
fn free_form_group_by_orders_by_count_then_label() {
    let conn = evolved();
    for value in ["Rayon B", "Rayon A", "Rayon C", "Rayon C"] {
        insert(&conn, "rayon", Some(value));
    }

    let report = aggregation::summarize(&conn).unwrap();
    let labels: Vec<Option<&str>> = report
        .groups("by_rayon")
        .unwrap()
        .iter()
        .map(|g| g.category.as_deref())
        .collect();
    assert_eq!(labels, vec![Some("Rayon C"), Some("Rayon A"), Some("Rayon B"), None]);
}

#[test]
fn conditional_group_by_only_counts_owners() {
    let conn = evolved();
    conn.execute_batch(
        "INSERT INTO congregants (full_name, owns_business, business_type) VALUES ('a', 1, 'Kuliner');
         INSERT INTO congregants (full_name, owns_business, business_type) VALUES ('b', 1, 'Kuliner');
         INSERT INTO congregants (full_name, owns_business, business_type) VALUES ('c', 1, NULL);
         INSERT INTO congregants (full_name, owns_business, business_type) VALUES ('d', 0, 'Bengkel');",
    )
    .unwrap();

    let report = aggregation::summarize(&conn).unwrap();
    assert_eq!(
        report.groups("business_type_among_owners").unwrap(),
        &[
            GroupCount { category: Some("Kuliner".into()), count: 2 },
            GroupCount { category: None, count: 1 },
        ]
    );
    assert_eq!(report.count("business_owner_count"), Some(3));
}

// ═══════════════════════════════════════════════════════════════════════════
// Filtered counts
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn professional_count_excludes_non_working_and_blank() {
    let conn = evolved();
    for value in [
        Some("Wiraswasta"),
        Some("Pelajar/Mahasiswa"),
        Some("Pensiunan"),
        Some("Ibu Rumah Tangga"),
        Some(" "),
        None,
    ] {
        insert(&conn, "job_category", value);
    }

    let report = aggregation::summarize(&conn).unwrap();
    assert_eq!(report.count("professional_count"), Some(1));
}

#[test]
fn professional_count_ignores_case_of_non_working_answers() {
    let conn = evolved();
    for value in ["pensiunan", "PELAJAR/MAHASISWA", " ibu rumah tangga ", "wiraswasta"] {
        insert(&conn, "job_category", Some(value));
    }

    let report = aggregation::summarize(&conn).unwrap();
    assert_eq!(report.count("professional_count"), Some(1));
}

#[test]
fn flags_count_numeric_and_text_answers_after_widening() {
    let conn = evolved();
    for value in ["1", "0", "Ya", " yes ", "Tidak", "true"] {
        insert(&conn, "receives_assistance", Some(value));
    }

    let report = aggregation::summarize(&conn).unwrap();
    assert_eq!(report.count("assistance_recipient_count"), Some(4));
}

// ═══════════════════════════════════════════════════════════════════════════
// Tag frequency
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn tag_frequency_ignores_null_and_malformed_cells() {
    let conn = evolved();
    for value in [
        Some(r#"["A","B"]"#),
        Some(r#"["B"]"#),
        None,
        Some("not-json"),
        Some(r#"{"A":1}"#),
    ] {
        insert(&conn, "interest_areas", value);
    }

    let report = aggregation::summarize(&conn).unwrap();
    assert_eq!(report.tags("interest_areas").unwrap(), &[tag("B", 2), tag("A", 1)]);
    assert!(!report.is_degraded());
}

#[test]
fn tag_ties_keep_first_seen_order() {
    let conn = evolved();
    for value in [r#"["Doa","Musik"]"#, r#"["Musik","Doa"," "]"#, r#"["Lektor"]"#] {
        insert(&conn, "contribution_types", Some(value));
    }

    let report = aggregation::summarize(&conn).unwrap();
    assert_eq!(
        report.tags("contribution_types").unwrap(),
        &[tag("Doa", 2), tag("Musik", 2), tag("Lektor", 1)]
    );
}

#[test]
fn tags_differing_in_whitespace_count_separately() {
    let conn = evolved();
    for value in [r#"["A"," A"]"#, r#"["A"]"#, r#"["A "]"#] {
        insert(&conn, "interest_areas", Some(value));
    }

    let report = aggregation::summarize(&conn).unwrap();
    assert_eq!(
        report.tags("interest_areas").unwrap(),
        &[tag("A", 2), tag(" A", 1), tag("A ", 1)]
    );
}

#[test]
fn chronic_diseases_merges_personal_and_family_columns() {
    let conn = evolved();
    conn.execute(
        "INSERT INTO congregants (full_name, chronic_conditions, family_chronic_conditions)
         VALUES ('x', '[\"Diabetes\"]', '[\"Hipertensi\",\"Diabetes\"]')",
        [],
    )
    .unwrap();

    let report = aggregation::summarize(&conn).unwrap();
    assert_eq!(report.tag_frequency("chronic_diseases", "Diabetes"), 2);
    assert_eq!(report.tag_frequency("chronic_diseases", "Hipertensi"), 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// Single metric
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn summarize_metric_by_name() {
    let conn = evolved();
    insert(&conn, "gender", Some("Perempuan"));

    let value = aggregation::summarize_metric(&conn, "total_congregants").unwrap();
    assert_eq!(value, Some(MetricValue::Count(1)));
    assert_eq!(aggregation::summarize_metric(&conn, "average_age").unwrap(), None);
}

#[test]
fn summarize_inside_caller_transaction() {
    let conn = evolved();
    let tx = conn.unchecked_transaction().unwrap();
    insert(&tx, "sector", Some("Sektor 3"));

    let report = aggregation::summarize(&tx).unwrap();
    assert_eq!(report.group_count("by_sector", Some("Sektor 3")), Some(1));
    tx.rollback().unwrap();
}
