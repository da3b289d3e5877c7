//! arona API client configuration.
//!
//! Configures the search API base URL and the CDN prefix that asset paths
//! are appended to. Defaults point to the public service. Override via
//! environment variables or explicit construction for testing.

use url::Url;

/// Default search API base.
pub const DEFAULT_API_BASE: &str = "https://arona.diyigemt.com/api/v2";

/// Default CDN prefix for `type == "file"` content paths.
pub const DEFAULT_CDN_PREFIX: &str = "https://arona.cdn.diyigemt.com/image";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the arona API and CDN.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the search API. The search endpoint is `{api_base}/image`.
    pub api_base: Url,
    /// Prefix prepended verbatim to an item's `content` path to form the
    /// download URL.
    pub cdn_prefix: Url,
    /// Timeout applied to every request, search and download alike.
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `ARONA_API_BASE` (default: `https://arona.diyigemt.com/api/v2`)
    /// - `ARONA_CDN_PREFIX` (default: `https://arona.cdn.diyigemt.com/image`)
    /// - `ARONA_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_base: env_url("ARONA_API_BASE", DEFAULT_API_BASE)?,
            cdn_prefix: env_url("ARONA_CDN_PREFIX", DEFAULT_CDN_PREFIX)?,
            timeout_secs: match std::env::var("ARONA_TIMEOUT_SECS") {
                Ok(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber("ARONA_TIMEOUT_SECS".into(), raw))?,
                Err(_) => DEFAULT_TIMEOUT_SECS,
            },
        })
    }

    /// Create a configuration pointing both endpoints at one local server
    /// (for testing). Search lives under `/api/v2`, assets under `/image`.
    pub fn local(base_uri: &str) -> Result<Self, ConfigError> {
        let base = base_uri.trim_end_matches('/');
        let make_url = |suffix: &str| -> Result<Url, ConfigError> {
            let raw = format!("{base}{suffix}");
            Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(raw, e.to_string()))
        };
        Ok(Self {
            api_base: make_url("/api/v2")?,
            cdn_prefix: make_url("/image")?,
            timeout_secs: 5,
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("{0} must be a non-negative integer, got {1:?}")]
    InvalidNumber(String, String),
}
