//! V006: diaconal assistance.

use sensus_core::constants::CONGREGANTS_TABLE as T;
use sensus_core::types::{ColumnSpec, SemanticType};

pub fn column_specs() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::add(T, "receives_assistance", SemanticType::Flag)
            .not_null()
            .default_int(0)
            .after("children_schooling"),
        ColumnSpec::add(T, "assistance_type", SemanticType::VarText(120))
            .after("receives_assistance"),
        ColumnSpec::add(T, "notes", SemanticType::Text).after("assistance_type"),
    ]
}
