//! Yes/no survey answers held as the text the store carries.
//!
//! Columns that were widened to TEXT may hold free-form answers such as a
//! business name instead of `1`/`0`. The raw text is kept so that reading a
//! record and writing it back never rewrites the answer.

use serde::{Deserialize, Serialize};

use crate::reference::is_truthy_flag;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagAnswer(String);

impl FlagAnswer {
    pub fn yes() -> Self {
        Self("1".to_string())
    }

    pub fn no() -> Self {
        Self("0".to_string())
    }

    /// Keep an answer exactly as entered.
    pub fn from_text(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// True for `1` and the accepted truthy words, case-insensitively.
    pub fn is_set(&self) -> bool {
        is_truthy_flag(&self.0)
    }

    /// The stored text, bound back unchanged on update.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FlagAnswer {
    fn default() -> Self {
        Self::no()
    }
}

impl From<bool> for FlagAnswer {
    fn from(set: bool) -> Self {
        if set {
            Self::yes()
        } else {
            Self::no()
        }
    }
}

