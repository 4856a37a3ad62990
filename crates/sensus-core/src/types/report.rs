//! AggregationReport: the derived, disposable dashboard view.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One bucket of a group-by count. `category` is `None` for the null/empty
/// bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub category: Option<String>,
    pub count: u64,
}

/// Occurrences of one tag across all records and columns of a metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub frequency: u64,
}

/// Value of a single named metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum MetricValue {
    Count(u64),
    Sum(i64),
    Groups(Vec<GroupCount>),
    Tags(Vec<TagCount>),
}

impl MetricValue {
    pub fn as_count(&self) -> Option<u64> {
        match self {
            Self::Count(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_sum(&self) -> Option<i64> {
        match self {
            Self::Sum(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_groups(&self) -> Option<&[GroupCount]> {
        match self {
            Self::Groups(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_tags(&self) -> Option<&[TagCount]> {
        match self {
            Self::Tags(t) => Some(t),
            _ => None,
        }
    }
}

/// Every catalog metric by stable name, plus the names of metrics that fell
/// back to their zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationReport {
    pub metrics: BTreeMap<String, MetricValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded: Vec<String>,
}

impl AggregationReport {
    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.metrics.get(name)
    }

    pub fn count(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(MetricValue::as_count)
    }

    pub fn sum(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(MetricValue::as_sum)
    }

    pub fn groups(&self, name: &str) -> Option<&[GroupCount]> {
        self.get(name).and_then(MetricValue::as_groups)
    }

    pub fn tags(&self, name: &str) -> Option<&[TagCount]> {
        self.get(name).and_then(MetricValue::as_tags)
    }

    /// Count of one group-by bucket; `None` selects the null bucket.
    pub fn group_count(&self, name: &str, category: Option<&str>) -> Option<u64> {
        self.groups(name)?
            .iter()
            .find(|g| g.category.as_deref() == category)
            .map(|g| g.count)
    }

    /// Frequency of one tag, 0 when the tag never occurs.
    pub fn tag_frequency(&self, name: &str, tag: &str) -> u64 {
        self.tags(name)
            .and_then(|tags| tags.iter().find(|t| t.tag == tag))
            .map(|t| t.frequency)
            .unwrap_or(0)
    }

    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}
