//! Identifiers used across Gumroad APIs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Gumroad link (product) id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(String);

impl LinkId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LinkId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LinkId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&LinkId> for LinkId {
    fn from(value: &LinkId) -> Self {
        value.clone()
    }
}
