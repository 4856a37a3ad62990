//! Top-level configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DatabaseConfig, EvolutionConfig, ReportConfig};
use crate::constants::{CONFIG_FILE_NAME, MAX_READ_POOL_SIZE};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sections.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `CliOverrides`)
/// 2. Environment variables (`SENSUS_*`)
/// 3. Project config (`sensus.toml` in the config directory)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SensusConfig {
    pub database: DatabaseConfig,
    pub evolution: EvolutionConfig,
    pub report: ReportConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub db_path: Option<String>,
    pub strict: Option<bool>,
    pub pretty: Option<bool>,
}

impl SensusConfig {
    /// Load configuration from `dir`, then apply env and CLI layers.
    pub fn load(dir: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = dir.join(CONFIG_FILE_NAME);
        if project_config_path.exists() {
            let file_config = Self::read_toml_file(&project_config_path)?;
            Self::merge(&mut config, &file_config);
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn validate(config: &SensusConfig) -> Result<(), ConfigError> {
        if let Some(size) = config.database.read_pool_size {
            if !(1..=MAX_READ_POOL_SIZE).contains(&size) {
                return Err(ConfigError::ValidationFailed {
                    field: "database.read_pool_size".to_string(),
                    message: format!("must be between 1 and {MAX_READ_POOL_SIZE}"),
                });
            }
        }
        if let Some(ref path) = config.database.path {
            if path.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "database.path".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Unknown keys are ignored so older binaries accept newer files.
    fn read_toml_file(path: &Path) -> Result<SensusConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::Unreadable {
                path: path.display().to_string(),
                message: e.to_string(),
            },
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Merge `other` into `base`; `Some` values in `other` win.
    fn merge(base: &mut SensusConfig, other: &SensusConfig) {
        if other.database.path.is_some() {
            base.database.path = other.database.path.clone();
        }
        if other.database.read_pool_size.is_some() {
            base.database.read_pool_size = other.database.read_pool_size;
        }
        if other.evolution.strict.is_some() {
            base.evolution.strict = other.evolution.strict;
        }
        if other.report.pretty.is_some() {
            base.report.pretty = other.report.pretty;
        }
    }

    /// Pattern: `SENSUS_DB_PATH`, `SENSUS_READ_POOL_SIZE`, ...
    /// Unparsable values are ignored.
    fn apply_env_overrides(config: &mut SensusConfig) {
        if let Ok(val) = std::env::var("SENSUS_DB_PATH") {
            config.database.path = Some(val);
        }
        if let Ok(val) = std::env::var("SENSUS_READ_POOL_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.database.read_pool_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SENSUS_STRICT_MIGRATIONS") {
            if let Ok(v) = val.parse::<bool>() {
                config.evolution.strict = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SENSUS_PRETTY_REPORT") {
            if let Ok(v) = val.parse::<bool>() {
                config.report.pretty = Some(v);
            }
        }
    }

    fn apply_cli_overrides(config: &mut SensusConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.db_path {
            config.database.path = Some(v.clone());
        }
        if let Some(v) = cli.strict {
            config.evolution.strict = Some(v);
        }
        if let Some(v) = cli.pretty {
            config.report.pretty = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
