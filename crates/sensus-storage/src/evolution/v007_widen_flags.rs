//! V007: yes/no questions become free-text answers; longer job titles.
//!
//! Existing 0/1 values are kept and read as text afterwards.

use sensus_core::constants::CONGREGANTS_TABLE as T;
use sensus_core::types::{ColumnSpec, SemanticType};

pub fn column_specs() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::widen(T, "owns_business", SemanticType::Text),
        ColumnSpec::widen(T, "receives_assistance", SemanticType::Text),
        ColumnSpec::widen(T, "job_title", SemanticType::VarText(255)),
    ]
}
