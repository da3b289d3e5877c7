//! # Asset Names
//!
//! Remote item names become local filenames (`{name}{ext}`). The service
//! does not promise filesystem-safe names, so every name is validated
//! before it touches a path.
//!
//! ## Rejected Names
//!
//! - empty, `.` or `..`
//! - leading `.` (hidden files, and the index document's temp files)
//! - `/`, `\`, NUL or any other control character
//! - longer than [`MAX_NAME_BYTES`] bytes
//!
//! Non-ASCII names (`ミカ`, `白子`) are accepted unchanged.

use std::fmt;

use thiserror::Error;

/// Longest accepted name, in UTF-8 bytes. Leaves room for an extension
/// under the common 255-byte filename limit.
pub const MAX_NAME_BYTES: usize = 200;

/// A name that cannot be used as a cache filename.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("asset name is empty")]
    Empty,

    #[error("asset name {0:?} is a relative path component")]
    DotComponent(String),

    #[error("asset name {0:?} starts with '.'")]
    Hidden(String),

    #[error("asset name {name:?} contains forbidden character {ch:?}")]
    ForbiddenChar { name: String, ch: char },

    #[error("asset name is {len} bytes long (max {MAX_NAME_BYTES})")]
    TooLong { len: usize },
}

/// A validated, filesystem-safe logical resource name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetName(String);

impl AssetName {
    /// Validate `name` for use as a cache filename stem.
    pub fn new(name: &str) -> Result<Self, NameError> {
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if name == "." || name == ".." {
            return Err(NameError::DotComponent(name.to_string()));
        }
        if let Some(ch) = name
            .chars()
            .find(|c| *c == '/' || *c == '\\' || c.is_control())
        {
            return Err(NameError::ForbiddenChar {
                name: name.to_string(),
                ch,
            });
        }
        if name.starts_with('.') {
            return Err(NameError::Hidden(name.to_string()));
        }
        if name.len() > MAX_NAME_BYTES {
            return Err(NameError::TooLong { len: name.len() });
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AssetName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
