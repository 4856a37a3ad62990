//! Tests for the layered census configuration.

use std::path::PathBuf;
use std::sync::Mutex;

use sensus_core::config::{CliOverrides, SensusConfig};
use sensus_core::errors::ConfigError;

/// Serializes tests that touch `SENSUS_*` environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

fn clear_sensus_env_vars() {
    for key in [
        "SENSUS_DB_PATH",
        "SENSUS_READ_POOL_SIZE",
        "SENSUS_STRICT_MIGRATIONS",
        "SENSUS_PRETTY_REPORT",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn cli_beats_env_beats_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_sensus_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("sensus.toml"),
        r#"
[database]
path = "from-file.db"
read_pool_size = 2

[evolution]
strict = true
"#,
    )
    .unwrap();

    std::env::set_var("SENSUS_READ_POOL_SIZE", "6");
    std::env::set_var("SENSUS_DB_PATH", "from-env.db");

    let cli = CliOverrides {
        db_path: Some("from-cli.db".to_string()),
        ..Default::default()
    };
    let config = SensusConfig::load(dir.path(), Some(&cli)).unwrap();

    assert_eq!(config.database.effective_path(), PathBuf::from("from-cli.db"));
    assert_eq!(config.database.effective_read_pool_size(), 6);
    assert!(config.evolution.is_strict());

    clear_sensus_env_vars();
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_sensus_env_vars();

    let dir = tempdir();
    let config = SensusConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.database.effective_path(), PathBuf::from("sensus.db"));
    assert_eq!(config.database.effective_read_pool_size(), 4);
    assert!(!config.evolution.is_strict());
    assert!(!config.report.is_pretty());
}

#[test]
fn unparsable_env_values_are_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_sensus_env_vars();

    std::env::set_var("SENSUS_READ_POOL_SIZE", "lots");
    std::env::set_var("SENSUS_PRETTY_REPORT", "sure");
    let config = SensusConfig::load(tempdir().path(), None).unwrap();

    assert_eq!(config.database.read_pool_size, None);
    assert_eq!(config.report.pretty, None);

    clear_sensus_env_vars();
}

#[test]
fn out_of_range_pool_size_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_sensus_env_vars();

    std::env::set_var("SENSUS_READ_POOL_SIZE", "0");
    let err = SensusConfig::load(tempdir().path(), None).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::ValidationFailed { ref field, .. } if field == "database.read_pool_size"
    ));

    clear_sensus_env_vars();
}

#[test]
fn blank_db_path_fails_validation() {
    let config = SensusConfig::from_toml("[database]\npath = \"  \"\n").unwrap();
    assert!(matches!(
        SensusConfig::validate(&config),
        Err(ConfigError::ValidationFailed { .. })
    ));
}

#[test]
fn malformed_file_reports_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_sensus_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("sensus.toml"), "[database\npath = 1").unwrap();
    let err = SensusConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn unknown_keys_are_tolerated() {
    let config = SensusConfig::from_toml(
        r#"
[report]
pretty = true
colour = "blue"

[future_section]
enabled = true
"#,
    )
    .unwrap();
    assert!(config.report.is_pretty());
}

#[test]
fn toml_round_trip_keeps_set_values() {
    let mut config = SensusConfig::default();
    config.database.path = Some("parish.db".to_string());
    config.evolution.strict = Some(true);

    let reparsed = SensusConfig::from_toml(&config.to_toml().unwrap()).unwrap();
    assert_eq!(reparsed.database.path.as_deref(), Some("parish.db"));
    assert_eq!(reparsed.evolution.strict, Some(true));
    assert_eq!(reparsed.database.read_pool_size, None);
}

#[test]
fn unreadable_config_path_is_reported() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_sensus_env_vars();

    // Exists, but is a directory.
    let dir = tempdir();
    std::fs::create_dir(dir.path().join("sensus.toml")).unwrap();
    let err = SensusConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::Unreadable { .. }), "{err:?}");
}
