//! V003: work, income, and business ownership.

use sensus_core::constants::CONGREGANTS_TABLE as T;
use sensus_core::types::{ColumnSpec, SemanticType};

pub fn column_specs() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::add(T, "job_category", SemanticType::VarText(64)).after("children_count"),
        ColumnSpec::add(T, "job_title", SemanticType::VarText(120)).after("job_category"),
        ColumnSpec::add(T, "income_bracket", SemanticType::VarText(64)).after("job_title"),
        ColumnSpec::add(T, "owns_business", SemanticType::Flag)
            .not_null()
            .default_int(0)
            .after("income_bracket"),
        ColumnSpec::add(T, "business_type", SemanticType::VarText(120)).after("owns_business"),
    ]
}
