//! Schema evolution configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Treat any failed column spec as a failed deploy (non-zero exit).
    /// Default: false; failures are reported but do not stop the deploy.
    pub strict: Option<bool>,
}

impl EvolutionConfig {
    pub fn is_strict(&self) -> bool {
        self.strict.unwrap_or(false)
    }
}
