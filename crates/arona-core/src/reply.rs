//! Reply events emitted while a query is handled.

use std::path::PathBuf;

/// One message for the hosting chat platform to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Plain text.
    Text(String),
    /// A locally cached image file.
    Image(PathBuf),
}

impl Reply {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// The text body, if this is a text reply.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Image(_) => None,
        }
    }
}
