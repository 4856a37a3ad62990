//! V002: locality (sector, lingkungan, rayon) and household size.

use sensus_core::constants::CONGREGANTS_TABLE as T;
use sensus_core::types::{ColumnSpec, SemanticType};

pub fn column_specs() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::add(T, "sector", SemanticType::VarText(64)).after("address"),
        ColumnSpec::add(T, "lingkungan", SemanticType::VarText(64)).after("sector"),
        ColumnSpec::add(T, "rayon", SemanticType::VarText(64)).after("lingkungan"),
        ColumnSpec::add(T, "household_size", SemanticType::Integer)
            .not_null()
            .default_int(1)
            .after("rayon"),
        ColumnSpec::add(T, "children_count", SemanticType::Integer)
            .not_null()
            .default_int(0)
            .after("household_size"),
    ]
}
