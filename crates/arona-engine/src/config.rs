//! Resolution engine configuration.
//!
//! Variables read by [`EngineConfig::from_env`]:
//! - `ARONA_RESULT_SIZE` (default: 8): maximum fuzzy candidates requested
//! - `ARONA_METHOD` (default: 1): fuzzy-matching strategy, `1` or `2`
//! - `ARONA_FUZZY_POLICY` (default: `list`): `list` or `auto-select`

use std::fmt;
use std::str::FromStr;

use arona_core::{SearchMethod, UnknownMethod};

/// Default maximum number of fuzzy candidates.
pub const DEFAULT_RESULT_SIZE: u32 = 8;

/// What to do with a fuzzy result list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FuzzyPolicy {
    /// Show the candidate list and stop.
    #[default]
    ListOnly,
    /// Show the candidate list, then deliver the first candidate as if it
    /// had been an exact match.
    AutoSelectFirst,
}

impl FromStr for FuzzyPolicy {
    type Err = EngineConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "list" | "list-only" => Ok(Self::ListOnly),
            "auto-select" | "auto" | "first" => Ok(Self::AutoSelectFirst),
            other => Err(EngineConfigError::InvalidFuzzyPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for FuzzyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListOnly => f.write_str("list"),
            Self::AutoSelectFirst => f.write_str("auto-select"),
        }
    }
}

/// Per-deployment engine settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// `size` parameter sent with every search. Always at least 1.
    pub result_size: u32,
    /// `method` parameter sent with every search.
    pub method: SearchMethod,
    pub fuzzy_policy: FuzzyPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            result_size: DEFAULT_RESULT_SIZE,
            method: SearchMethod::default(),
            fuzzy_policy: FuzzyPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, EngineConfigError> {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var("ARONA_RESULT_SIZE") {
            config.result_size = parse_result_size(&raw)?;
        }
        if let Ok(raw) = std::env::var("ARONA_METHOD") {
            config.method = raw.parse()?;
        }
        if let Ok(raw) = std::env::var("ARONA_FUZZY_POLICY") {
            config.fuzzy_policy = raw.parse()?;
        }
        Ok(config)
    }
}

/// Parse a result size, rejecting zero.
pub fn parse_result_size(raw: &str) -> Result<u32, EngineConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(EngineConfigError::InvalidResultSize(raw.to_string())),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum EngineConfigError {
    #[error("result size must be a positive integer, got {0:?}")]
    InvalidResultSize(String),
    #[error("fuzzy policy must be \"list\" or \"auto-select\", got {0:?}")]
    InvalidFuzzyPolicy(String),
    #[error(transparent)]
    InvalidMethod(#[from] UnknownMethod),
}
