//! Tag-set columns: JSON-encoded arrays of free-form strings at rest.
//!
//! Stored values are not trusted. Anything that does not deserialize to an
//! array of strings reads back as an empty set instead of an error.

use serde::{Deserialize, Serialize};

/// An ordered list of tags as entered on the survey form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tags.into_iter().map(Into::into).collect())
    }

    /// Strict parse: the cell must be a JSON array of strings.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Vec<String>>(raw).map(Self)
    }

    /// Defensive parse used on every read path. Non-JSON, object-shaped, or
    /// mixed arrays yield an empty set.
    pub fn parse_lenient(raw: &str) -> Self {
        match Self::parse(raw) {
            Ok(tags) => tags,
            Err(e) => {
                tracing::debug!(error = %e, "malformed tag set treated as empty");
                Self::default()
            }
        }
    }

    /// Same as [`TagSet::parse_lenient`] for a nullable cell.
    pub fn from_cell(raw: Option<&str>) -> Self {
        raw.map(Self::parse_lenient).unwrap_or_default()
    }

    /// Tags exactly as stored, skipping empty and whitespace-only entries.
    pub fn non_blank(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str).filter(|t| !t.trim().is_empty())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// JSON encoding written to the store.
    pub fn to_json(&self) -> String {
        // Vec<String> serialization cannot fail.
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
