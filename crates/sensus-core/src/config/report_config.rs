//! Report output configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Pretty-print report JSON. Default: false.
    pub pretty: Option<bool>,
}

impl ReportConfig {
    pub fn is_pretty(&self) -> bool {
        self.pretty.unwrap_or(false)
    }
}
