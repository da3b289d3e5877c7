//! # Cache Error Types
//!
//! Every variant is a local filesystem or encoding failure. None of them
//! leave the index pointing at a file that was not fully written.

use std::path::PathBuf;

use arona_core::NameError;
use thiserror::Error;

/// Errors from the local asset cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Reading, writing, or creating a file or directory failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Renaming a fully written temp file onto its final path failed.
    #[error("failed to persist {path}: {source}")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The index document exists but is not a JSON object of strings.
    #[error("index document {path} is corrupt: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The index could not be serialized.
    #[error("failed to encode index: {0}")]
    Encode(#[from] serde_json::Error),

    /// The item name cannot be used as a cache filename.
    #[error("invalid asset name: {0}")]
    InvalidName(#[from] NameError),
}

impl CacheError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
