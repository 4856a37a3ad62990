//! V001: registration form: identity and contact details.

use sensus_core::constants::CONGREGANTS_TABLE as T;
use sensus_core::types::{ColumnSpec, SemanticType};

pub fn column_specs() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::add(T, "gender", SemanticType::VarText(16)).after("full_name"),
        ColumnSpec::add(T, "birth_date", SemanticType::Date).after("gender"),
        ColumnSpec::add(T, "birth_place", SemanticType::VarText(100)).after("birth_date"),
        ColumnSpec::add(T, "marital_status", SemanticType::VarText(32)).after("birth_place"),
        ColumnSpec::add(T, "phone", SemanticType::VarText(32)).after("marital_status"),
        ColumnSpec::add(T, "email", SemanticType::VarText(120)).after("phone"),
        ColumnSpec::add(T, "address", SemanticType::Text).after("email"),
    ]
}
