//! Per-spec evolution outcomes.

use serde::{Deserialize, Serialize};

/// Result of applying one `ColumnSpec`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum EvolutionOutcome {
    /// The DDL ran and changed the schema.
    Applied,
    /// The column (or widened type) was already there. Counts as success.
    AlreadyPresent,
    /// The operation failed for a reason other than a duplicate definition.
    Failed(String),
}

impl EvolutionOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Tally of an outcome list, for logs and exit status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EvolutionSummary {
    pub applied: usize,
    pub already_present: usize,
    pub failed: usize,
}

impl EvolutionSummary {
    pub fn from_outcomes(outcomes: &[EvolutionOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut acc, outcome| {
            match outcome {
                EvolutionOutcome::Applied => acc.applied += 1,
                EvolutionOutcome::AlreadyPresent => acc.already_present += 1,
                EvolutionOutcome::Failed(_) => acc.failed += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.applied + self.already_present + self.failed
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}
