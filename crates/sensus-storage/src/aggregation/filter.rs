//! Row predicates for filtered counts and conditional group-bys.

use sensus_core::reference::TRUTHY_FLAG_VALUES;

/// A predicate over one column. A missing or null cell never matches.
#[derive(Debug, Clone, Copy)]
pub enum Filter {
    /// Flag column holds a truthy answer (`1`, `ya`, `yes`, ...).
    FlagSet(&'static str),
    /// Column is non-blank and its trimmed value is not in `values`,
    /// compared case-insensitively.
    NotIn {
        column: &'static str,
        values: &'static [&'static str],
    },
}

impl Filter {
    pub fn column(&self) -> &'static str {
        match self {
            Self::FlagSet(column) | Self::NotIn { column, .. } => column,
        }
    }

    /// SQL predicate with its bound parameters.
    pub fn to_sql(&self) -> (String, Vec<String>) {
        let cell = format!("TRIM(CAST(\"{}\" AS TEXT))", self.column());
        match self {
            Self::FlagSet(_) => (
                format!("LOWER({cell}) IN ({})", placeholders(TRUTHY_FLAG_VALUES.len())),
                TRUTHY_FLAG_VALUES.iter().map(|v| v.to_string()).collect(),
            ),
            Self::NotIn { values, .. } if values.is_empty() => {
                (format!("NULLIF({cell}, '') IS NOT NULL"), Vec::new())
            }
            Self::NotIn { values, .. } => (
                format!(
                    "NULLIF({cell}, '') IS NOT NULL AND LOWER({cell}) NOT IN ({})",
                    placeholders(values.len())
                ),
                values.iter().map(|v| v.to_lowercase()).collect(),
            ),
        }
    }
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}
