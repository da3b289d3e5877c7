//! # arona-client -- Typed Rust client for the arona strategy-image API
//!
//! Two calls, both plain `GET`s:
//! - **Search** via `{api_base}/image?name=..&size=..&method=..`, classified
//!   into a [`ResolutionOutcome`].
//! - **Download** via `{cdn_prefix}{content}`, returning the raw asset bytes.
//!
//! ## Failure Model
//!
//! [`ImageClient::resolve`] never returns `Err`: transport failures, non-2xx
//! statuses and malformed bodies all fold into
//! [`ResolutionOutcome::ServiceError`]. [`ImageClient::fetch_asset`] returns
//! a [`ClientError`] so the caller can decide what the user sees.
//!
//! ## Timeout & Retry
//!
//! Every request is bounded by [`ApiConfig::timeout_secs`]. There are no
//! retries: a single failed attempt is reported immediately and the caller
//! decides whether to ask again.

pub mod config;
pub mod error;
pub mod search;

pub use config::{ApiConfig, ConfigError};
pub use error::ClientError;

use std::time::Duration;

use arona_core::{ResolutionOutcome, SearchMethod};

use crate::search::SearchParams;

/// HTTP client for the arona search API and its CDN.
///
/// Cheaply cloneable: `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct ImageClient {
    http: reqwest::Client,
    search_url: String,
    cdn_prefix: String,
    timeout_secs: u64,
}

impl ImageClient {
    /// Create a new client from configuration.
    pub fn new(config: ApiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            search_url: format!("{}/image", config.api_base.as_str().trim_end_matches('/')),
            cdn_prefix: config.cdn_prefix.as_str().trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Resolve a free-text query into a classified outcome.
    ///
    /// The query is sent verbatim. Fuzzy lists are capped at `size` items.
    pub async fn resolve(&self, query: &str, size: u32, method: SearchMethod) -> ResolutionOutcome {
        let outcome = match self.search(query, size, method).await {
            Ok(body) => search::classify_body(&body, size),
            Err(e) => ResolutionOutcome::ServiceError(e.into_service_failure()),
        };
        if let ResolutionOutcome::ServiceError(failure) = &outcome {
            tracing::warn!(query, %failure, "search did not produce a usable response");
        } else {
            tracing::debug!(query, outcome = outcome.label(), "search classified");
        }
        outcome
    }

    /// Issue the search request and return the raw response body.
    pub async fn search(
        &self,
        query: &str,
        size: u32,
        method: SearchMethod,
    ) -> Result<String, ClientError> {
        let endpoint = "GET /image";
        let params = SearchParams {
            name: query,
            size,
            method,
        };
        tracing::debug!(query, size, %method, "sending search request");

        let resp = self
            .http
            .get(&self.search_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.transport_error(endpoint, e))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::ApiStatus {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        resp.text()
            .await
            .map_err(|e| self.transport_error(endpoint, e))
    }

    /// The download URL for a `type == "file"` content path.
    pub fn asset_url(&self, content: &str) -> String {
        if content.starts_with('/') {
            format!("{}{}", self.cdn_prefix, content)
        } else {
            format!("{}/{}", self.cdn_prefix, content)
        }
    }

    /// Download the asset at `{cdn_prefix}{content}`.
    pub async fn fetch_asset(&self, content: &str) -> Result<Vec<u8>, ClientError> {
        let url = self.asset_url(content);
        let endpoint = format!("GET {url}");
        tracing::debug!(%url, "downloading asset");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(&endpoint, e))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::ApiStatus {
                endpoint,
                status,
                body,
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| self.transport_error(&endpoint, e))?;
        Ok(bytes.to_vec())
    }

    fn transport_error(&self, endpoint: &str, e: reqwest::Error) -> ClientError {
        if e.is_timeout() {
            ClientError::Timeout {
                endpoint: endpoint.into(),
                timeout_secs: self.timeout_secs,
            }
        } else {
            ClientError::Http {
                endpoint: endpoint.into(),
                source: e,
            }
        }
    }
}
