//! Append-only release history of column specs.
//!
//! One batch per release, in release order. Published batches are never
//! edited or reordered; a new release appends a new batch. The applier does
//! not track versions: deploys re-apply the cumulative list and rely on
//! idempotence.

use sensus_core::types::ColumnSpec;

use super::{
    v001_registration, v002_locality, v003_socioeconomic, v004_education_health, v005_tags,
    v006_assistance, v007_widen_flags,
};

/// One release's batch.
#[derive(Debug, Clone)]
pub struct Release {
    pub name: &'static str,
    pub specs: Vec<ColumnSpec>,
}

/// Every release in order.
pub fn releases() -> Vec<Release> {
    vec![
        Release { name: "v001_registration", specs: v001_registration::column_specs() },
        Release { name: "v002_locality", specs: v002_locality::column_specs() },
        Release { name: "v003_socioeconomic", specs: v003_socioeconomic::column_specs() },
        Release { name: "v004_education_health", specs: v004_education_health::column_specs() },
        Release { name: "v005_tags", specs: v005_tags::column_specs() },
        Release { name: "v006_assistance", specs: v006_assistance::column_specs() },
        Release { name: "v007_widen_flags", specs: v007_widen_flags::column_specs() },
    ]
}

/// All batches concatenated in release order.
pub fn cumulative() -> Vec<ColumnSpec> {
    releases().into_iter().flat_map(|r| r.specs).collect()
}
