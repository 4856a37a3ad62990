//! Shared constants for the census workspace.

/// The wide entity table evolved by the release history.
pub const CONGREGANTS_TABLE: &str = "congregants";

/// Default database file name, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "sensus.db";

/// Project config file name.
pub const CONFIG_FILE_NAME: &str = "sensus.toml";

/// Default number of pooled read connections.
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

/// Upper bound on pooled read connections.
pub const MAX_READ_POOL_SIZE: usize = 8;

/// SQLite busy timeout applied to every connection, in milliseconds.
pub const BUSY_TIMEOUT_MS: u32 = 5000;

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "SENSUS_LOG";

/// Log filter used when `SENSUS_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "sensus=info";
