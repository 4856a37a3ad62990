//! CongregantRecord: the wide entity evolved by the release history.

use serde::{Deserialize, Serialize};

use super::{FlagAnswer, TagSet};

/// One registered congregant.
///
/// `id`, `created_at` and `updated_at` are assigned by the store; they are
/// `None` on a record that has not been registered yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CongregantRecord {
    pub id: Option<i64>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,

    // Identity / demographics
    pub full_name: String,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
    pub marital_status: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,

    // Locality
    pub sector: Option<String>,
    pub lingkungan: Option<String>,
    pub rayon: Option<String>,
    pub household_size: Option<i64>,
    pub children_count: Option<i64>,

    // Socio-economic
    pub job_category: Option<String>,
    pub job_title: Option<String>,
    pub income_bracket: Option<String>,
    pub owns_business: FlagAnswer,
    pub business_type: Option<String>,

    // Education / health
    pub education_level: Option<String>,
    pub health_insurance: Option<String>,
    pub has_disability: bool,
    pub chronic_conditions: TagSet,

    // Free-form tag sets
    pub interest_areas: TagSet,
    pub contribution_types: TagSet,
    pub disability_types: TagSet,
    pub family_chronic_conditions: TagSet,
    pub children_schooling: TagSet,

    // Assistance
    pub receives_assistance: FlagAnswer,
    pub assistance_type: Option<String>,
    pub notes: Option<String>,
}

impl CongregantRecord {
    /// A record with only the required name filled in.
    pub fn named(full_name: &str) -> Self {
        Self {
            full_name: full_name.to_string(),
            ..Self::default()
        }
    }
}
