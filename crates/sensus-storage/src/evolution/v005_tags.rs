//! V005: multi-select survey questions stored as tag sets.

use sensus_core::constants::CONGREGANTS_TABLE as T;
use sensus_core::types::{ColumnSpec, SemanticType};

pub fn column_specs() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::add(T, "interest_areas", SemanticType::TagSet).after("chronic_conditions"),
        ColumnSpec::add(T, "contribution_types", SemanticType::TagSet).after("interest_areas"),
        ColumnSpec::add(T, "disability_types", SemanticType::TagSet).after("contribution_types"),
        ColumnSpec::add(T, "family_chronic_conditions", SemanticType::TagSet)
            .after("disability_types"),
        ColumnSpec::add(T, "children_schooling", SemanticType::TagSet)
            .after("family_chronic_conditions"),
    ]
}
