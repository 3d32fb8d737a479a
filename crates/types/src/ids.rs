//! Newtype wrapper for outline anchor identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An identifier for a navigable heading in the final document.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnchorId(String);

impl AnchorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds a unique anchor from heading text and a per-document sequence number.
    pub fn for_heading(text: &str, sequence: usize) -> Self {
        let slug = slug::slugify(text);
        if slug.is_empty() {
            Self(format!("section-{}", sequence))
        } else {
            Self(format!("{}-{}", slug, sequence))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AnchorId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for AnchorId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
