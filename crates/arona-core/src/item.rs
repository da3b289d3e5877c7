//! # Result Items
//!
//! A single entry returned by the remote search service. The wire shape is
//! `{name, hash, type, content}` where `type` is either `"file"` (the
//! content is a CDN path fragment such as `/a/b.png`) or `"plain"` (the
//! content is literal text to show the user).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an item's `content` field is to be interpreted.
///
/// Closed set: an unrecognized `type` value fails deserialization and the
/// whole response is treated as malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// `content` is a remote path fragment resolved against the CDN prefix.
    #[serde(rename = "file")]
    Binary,
    /// `content` is literal text.
    #[serde(rename = "plain")]
    Text,
}

impl ItemKind {
    /// The wire value for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Binary => "file",
            Self::Text => "plain",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A search result as returned by the remote service.
///
/// `hash` is an opaque fingerprint supplied by the service. Two items with
/// the same hash are assumed to carry the same content; nothing here
/// recomputes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    pub name: String,
    pub hash: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub content: String,
}

/// Fuzzy-matching strategy requested from the remote service.
///
/// The service accepts two strategies, selected by the numeric `method`
/// query parameter. Which one a deployment uses is a configuration choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SearchMethod {
    /// `method=1`.
    #[default]
    Method1,
    /// `method=2`.
    Method2,
}

impl SearchMethod {
    /// The numeric value sent as the `method` query parameter.
    pub fn code(&self) -> u8 {
        match self {
            Self::Method1 => 1,
            Self::Method2 => 2,
        }
    }
}

impl From<SearchMethod> for u8 {
    fn from(m: SearchMethod) -> u8 {
        m.code()
    }
}

/// A `method` value other than 1 or 2.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search method {0:?}: expected 1 or 2")]
pub struct UnknownMethod(pub String);

impl TryFrom<u8> for SearchMethod {
    type Error = UnknownMethod;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Method1),
            2 => Ok(Self::Method2),
            other => Err(UnknownMethod(other.to_string())),
        }
    }
}

impl FromStr for SearchMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Method1),
            "2" => Ok(Self::Method2),
            other => Err(UnknownMethod(other.to_string())),
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
