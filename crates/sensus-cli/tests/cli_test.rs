//! Argument parsing and end-to-end command runs against a temp store.

use clap::Parser;
use sensus_cli::{handler, Cli, CliError, Commands};

fn run(args: &[&str]) -> (Result<(), CliError>, String) {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    let result = handler::run(cli, &mut out);
    (result, String::from_utf8(out).unwrap())
}

fn db_arg(dir: &tempfile::TempDir) -> String {
    dir.path().join("census.db").display().to_string()
}

#[test]
fn parses_subcommands_and_flags() {
    let cli = Cli::try_parse_from(["sensus", "--db", "x.db", "migrate", "--strict"]).unwrap();
    assert_eq!(cli.db.as_deref(), Some("x.db"));
    assert!(matches!(cli.command, Commands::Migrate { strict: true }));

    let cli = Cli::try_parse_from(["sensus", "report", "--metric", "by_sector", "--pretty"])
        .unwrap();
    match cli.command {
        Commands::Report { metric, pretty } => {
            assert_eq!(metric.as_deref(), Some("by_sector"));
            assert!(pretty);
        }
        other => panic!("unexpected command {other:?}"),
    }

    assert!(Cli::try_parse_from(["sensus", "rollback"]).is_err());
}

#[test]
fn migrate_then_report() {
    let dir = tempfile::tempdir().unwrap();
    let db = db_arg(&dir);
    let config_dir = dir.path().display().to_string();

    let (result, out) = run(&["sensus", "--config-dir", &config_dir, "--db", &db, "migrate"]);
    result.unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["summary"]["failed"], 0);
    assert_eq!(json["outcomes"][0]["status"], "applied");
    assert!(json["outcomes"][0]["spec"].as_str().unwrap().contains("gender"));

    let (result, out) = run(&["sensus", "--config-dir", &config_dir, "--db", &db, "migrate"]);
    result.unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["summary"]["applied"], 0);

    let (result, out) = run(&["sensus", "--config-dir", &config_dir, "--db", &db, "report"]);
    result.unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["metrics"]["total_congregants"]["value"], 0);
    assert!(json.get("degraded").is_none());
}

#[test]
fn unknown_metric_exits_with_usage_code() {
    let dir = tempfile::tempdir().unwrap();
    let db = db_arg(&dir);
    let config_dir = dir.path().display().to_string();

    let (result, _) = run(&[
        "sensus", "--config-dir", &config_dir, "--db", &db, "report", "--metric", "nope",
    ]);
    let err = result.unwrap_err();
    assert!(matches!(err, CliError::UnknownMetric { .. }));
    assert_eq!(err.exit_code(), 64);
}

#[test]
fn strict_migrate_fails_on_failed_spec() {
    let dir = tempfile::tempdir().unwrap();
    let db = db_arg(&dir);
    let config_dir = dir.path().display().to_string();
    {
        // A pre-existing TEXT job_title cannot be "widened" to VARCHAR(255).
        let conn = rusqlite::Connection::open(&db).unwrap();
        conn.execute_batch(
            "CREATE TABLE congregants (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                full_name TEXT NOT NULL,
                created_at INTEGER,
                updated_at INTEGER,
                job_title TEXT
            );",
        )
        .unwrap();
    }

    let (result, out) = run(&["sensus", "--config-dir", &config_dir, "--db", &db, "migrate"]);
    result.unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["summary"]["failed"], 1);

    let (result, _) = run(&[
        "sensus", "--config-dir", &config_dir, "--db", &db, "migrate", "--strict",
    ]);
    let err = result.unwrap_err();
    assert!(matches!(err, CliError::MigrationFailed { failed: 1 }));
    assert_eq!(err.exit_code(), 5);
}

#[test]
fn unreachable_store_exits_with_connection_code() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("missing").join("census.db").display().to_string();
    let config_dir = dir.path().display().to_string();

    let (result, out) = run(&["sensus", "--config-dir", &config_dir, "--db", &db, "migrate"]);
    assert_eq!(result.unwrap_err().exit_code(), 3);
    assert!(out.is_empty());
}

#[test]
fn metrics_lists_catalog_names() {
    let (result, out) = run(&["sensus", "metrics"]);
    result.unwrap();
    let names: Vec<&str> = out.lines().collect();
    assert!(names.contains(&"total_congregants"));
    assert!(names.contains(&"chronic_diseases"));
}

#[test]
fn schema_lists_evolved_columns() {
    let dir = tempfile::tempdir().unwrap();
    let db = db_arg(&dir);
    let config_dir = dir.path().display().to_string();
    run(&["sensus", "--config-dir", &config_dir, "--db", &db, "migrate"]).0.unwrap();

    let (result, out) = run(&["sensus", "--config-dir", &config_dir, "--db", &db, "schema"]);
    result.unwrap();
    assert!(
        out.lines()
            .any(|l| l.starts_with("owns_business TEXT NOT NULL DEFAULT")),
        "{out}"
    );
    assert!(out.lines().next().unwrap().starts_with("id INTEGER"));
}

#[test]
fn report_on_missing_store_fails_without_creating_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("typo.db");
    let db = path.display().to_string();
    let config_dir = dir.path().display().to_string();

    for command in ["report", "schema"] {
        let (result, out) = run(&["sensus", "--config-dir", &config_dir, "--db", &db, command]);
        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), 3, "{command}: {err}");
        assert!(out.is_empty());
        assert!(!path.exists(), "{command} created the store");
    }
}

#[test]
fn report_leaves_an_unmigrated_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("census.db");
    rusqlite::Connection::open(&path)
        .unwrap()
        .execute_batch("CREATE TABLE unrelated (id INTEGER PRIMARY KEY);")
        .unwrap();
    let db = path.display().to_string();
    let config_dir = dir.path().display().to_string();

    let (result, out) = run(&["sensus", "--config-dir", &config_dir, "--db", &db, "report"]);
    result.unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["metrics"]["total_congregants"]["value"], 0);

    let conn = rusqlite::Connection::open(&path).unwrap();
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'congregants'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(tables, 0);
    let mode: String = conn
        .query_row("PRAGMA journal_mode", [], |r| r.get(0))
        .unwrap();
    assert_eq!(mode, "delete");
}
