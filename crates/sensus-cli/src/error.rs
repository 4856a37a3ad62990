//! CLI error types.

use sensus_core::errors::{ConfigError, SensusErrorCode, StorageError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{}", .0.tagged_string())]
    Config(#[from] ConfigError),

    #[error("{}", .0.tagged_string())]
    Storage(#[from] StorageError),

    #[error("Unknown metric: {name}")]
    UnknownMetric { name: String },

    #[error("{failed} column spec(s) failed")]
    MigrationFailed { failed: usize },

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 2,
            CliError::Storage(e) if e.is_connection_failure() => 3,
            CliError::Storage(_) => 4,
            CliError::MigrationFailed { .. } => 5,
            CliError::UnknownMetric { .. } => 64,
            CliError::Io(_) | CliError::Json(_) => 1,
        }
    }
}
