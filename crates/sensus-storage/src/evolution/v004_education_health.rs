//! V004: education level and health.

use sensus_core::constants::CONGREGANTS_TABLE as T;
use sensus_core::types::{ColumnSpec, SemanticType};

pub fn column_specs() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::add(T, "education_level", SemanticType::VarText(64)).after("business_type"),
        ColumnSpec::add(T, "health_insurance", SemanticType::VarText(64))
            .after("education_level"),
        ColumnSpec::add(T, "has_disability", SemanticType::Flag)
            .not_null()
            .default_int(0)
            .after("health_insurance"),
        ColumnSpec::add(T, "chronic_conditions", SemanticType::TagSet).after("has_disability"),
    ]
}
