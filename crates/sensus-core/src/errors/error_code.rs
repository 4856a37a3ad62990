//! SensusErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this so operators and dashboards get a
/// stable code string independent of the human-readable message.
pub trait SensusErrorCode {
    /// Returns the error code string (e.g., "STORAGE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn tagged_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const CONNECTION_FAILED: &str = "CONNECTION_FAILED";
pub const DUPLICATE_DEFINITION: &str = "DUPLICATE_DEFINITION";
pub const OPERATION_FAILED: &str = "OPERATION_FAILED";
pub const MALFORMED_VALUE: &str = "MALFORMED_VALUE";
pub const DB_BUSY: &str = "DB_BUSY";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
