use serde::{Deserialize, Serialize};

/// An entry in the table of contents, supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// The text content of the heading.
    pub text: String,
    /// Heading level (1 = top level).
    pub level: u8,
}

impl TocEntry {
    pub fn new(text: impl Into<String>, level: u8) -> Self {
        Self { text: text.into(), level }
    }
}
