//! The metric catalog: one producer per named metric.
//!
//! Names are a public contract with dashboard consumers. Adding a metric is
//! safe; renaming or removing one is a breaking change.

use sensus_core::errors::StorageError;
use sensus_core::reference::{
    EDUCATION_LEVELS, GENDERS, HEALTH_INSURANCE, INCOME_BRACKETS, JOB_CATEGORIES,
    MARITAL_STATUSES, NON_WORKING_JOB_CATEGORIES, SECTORS,
};
use sensus_core::types::MetricValue;

use super::filter::Filter;
use super::session::ReadSession;

/// Shape of a metric's value, used to build its zero fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Count,
    Sum,
    Groups,
    Tags,
}

impl MetricKind {
    pub fn zero(self) -> MetricValue {
        match self {
            Self::Count => MetricValue::Count(0),
            Self::Sum => MetricValue::Sum(0),
            Self::Groups => MetricValue::Groups(Vec::new()),
            Self::Tags => MetricValue::Tags(Vec::new()),
        }
    }
}

type Producer = fn(&ReadSession<'_>) -> Result<MetricValue, StorageError>;

pub struct MetricDef {
    pub name: &'static str,
    pub kind: MetricKind,
    pub produce: Producer,
}

const fn metric(name: &'static str, kind: MetricKind, produce: Producer) -> MetricDef {
    MetricDef { name, kind, produce }
}

pub const METRICS: &[MetricDef] = &[
    metric("total_congregants", MetricKind::Count, total_congregants),
    metric("total_household_members", MetricKind::Sum, total_household_members),
    metric("total_children", MetricKind::Sum, total_children),
    metric("professional_count", MetricKind::Count, professional_count),
    metric("business_owner_count", MetricKind::Count, business_owner_count),
    metric("assistance_recipient_count", MetricKind::Count, assistance_recipient_count),
    metric("disability_count", MetricKind::Count, disability_count),
    metric("by_gender", MetricKind::Groups, by_gender),
    metric("by_sector", MetricKind::Groups, by_sector),
    metric("by_lingkungan", MetricKind::Groups, by_lingkungan),
    metric("by_rayon", MetricKind::Groups, by_rayon),
    metric("by_marital_status", MetricKind::Groups, by_marital_status),
    metric("by_job_category", MetricKind::Groups, by_job_category),
    metric("by_income_bracket", MetricKind::Groups, by_income_bracket),
    metric("by_education_level", MetricKind::Groups, by_education_level),
    metric("by_health_insurance", MetricKind::Groups, by_health_insurance),
    metric("business_type_among_owners", MetricKind::Groups, business_type_among_owners),
    metric(
        "assistance_type_among_recipients",
        MetricKind::Groups,
        assistance_type_among_recipients,
    ),
    metric("interest_areas", MetricKind::Tags, interest_areas),
    metric("contribution_types", MetricKind::Tags, contribution_types),
    metric("chronic_diseases", MetricKind::Tags, chronic_diseases),
    metric("disability_types", MetricKind::Tags, disability_types),
    metric("children_schooling", MetricKind::Tags, children_schooling),
];

pub fn find(name: &str) -> Option<&'static MetricDef> {
    METRICS.iter().find(|m| m.name == name)
}

// ---- Scalars ----

fn total_congregants(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    s.count(None).map(MetricValue::Count)
}

fn total_household_members(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    s.sum("household_size").map(MetricValue::Sum)
}

fn total_children(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    s.sum("children_count").map(MetricValue::Sum)
}

/// Working congregants: job category set and not student, homemaker,
/// retiree, or unemployed.
fn professional_count(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    let filter = Filter::NotIn {
        column: "job_category",
        values: NON_WORKING_JOB_CATEGORIES,
    };
    s.count(Some(&filter)).map(MetricValue::Count)
}

fn business_owner_count(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    s.count(Some(&Filter::FlagSet("owns_business"))).map(MetricValue::Count)
}

fn assistance_recipient_count(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    s.count(Some(&Filter::FlagSet("receives_assistance"))).map(MetricValue::Count)
}

fn disability_count(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    s.count(Some(&Filter::FlagSet("has_disability"))).map(MetricValue::Count)
}

// ---- Group-by ----

fn by_gender(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    s.group_by("gender", None, GENDERS).map(MetricValue::Groups)
}

fn by_sector(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    s.group_by("sector", None, SECTORS).map(MetricValue::Groups)
}

fn by_lingkungan(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    s.group_by("lingkungan", None, &[]).map(MetricValue::Groups)
}

fn by_rayon(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    s.group_by("rayon", None, &[]).map(MetricValue::Groups)
}

fn by_marital_status(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    s.group_by("marital_status", None, MARITAL_STATUSES).map(MetricValue::Groups)
}

fn by_job_category(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    s.group_by("job_category", None, JOB_CATEGORIES).map(MetricValue::Groups)
}

fn by_income_bracket(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    s.group_by("income_bracket", None, INCOME_BRACKETS).map(MetricValue::Groups)
}

fn by_education_level(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    s.group_by("education_level", None, EDUCATION_LEVELS).map(MetricValue::Groups)
}

fn by_health_insurance(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    s.group_by("health_insurance", None, HEALTH_INSURANCE).map(MetricValue::Groups)
}

fn business_type_among_owners(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    s.group_by("business_type", Some(&Filter::FlagSet("owns_business")), &[])
        .map(MetricValue::Groups)
}

fn assistance_type_among_recipients(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    s.group_by("assistance_type", Some(&Filter::FlagSet("receives_assistance")), &[])
        .map(MetricValue::Groups)
}

// ---- Tag frequency ----

fn interest_areas(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    s.tag_frequency(&["interest_areas"]).map(MetricValue::Tags)
}

fn contribution_types(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    s.tag_frequency(&["contribution_types"]).map(MetricValue::Tags)
}

/// The congregant's own conditions and those reported for the family.
fn chronic_diseases(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    s.tag_frequency(&["chronic_conditions", "family_chronic_conditions"])
        .map(MetricValue::Tags)
}

fn disability_types(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    s.tag_frequency(&["disability_types"]).map(MetricValue::Tags)
}

fn children_schooling(s: &ReadSession<'_>) -> Result<MetricValue, StorageError> {
    s.tag_frequency(&["children_schooling"]).map(MetricValue::Tags)
}
