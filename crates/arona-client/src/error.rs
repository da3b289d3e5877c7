//! arona API client error types.

use arona_core::ServiceFailure;

/// Errors from arona API and CDN calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error (connection refused, reset, TLS, body read).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The request did not complete within the configured timeout.
    #[error("{endpoint} timed out after {timeout_secs}s")]
    Timeout { endpoint: String, timeout_secs: u64 },
    /// The server returned a non-2xx status.
    #[error("{endpoint} returned {status}: {body}")]
    ApiStatus {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// The response body did not match the expected schema.
    #[error("malformed response from {endpoint}: {reason}")]
    Malformed { endpoint: String, reason: String },
}

impl ClientError {
    /// Fold this error into the failure shape carried by
    /// [`ResolutionOutcome::ServiceError`](arona_core::ResolutionOutcome::ServiceError).
    pub fn into_service_failure(self) -> ServiceFailure {
        match self {
            Self::ApiStatus { status, .. } => ServiceFailure::HttpStatus { status },
            Self::Malformed { reason, .. } => ServiceFailure::Api {
                code: None,
                message: reason,
            },
            other @ (Self::Http { .. } | Self::Timeout { .. }) => {
                ServiceFailure::Transport {
                    reason: other.to_string(),
                }
            }
        }
    }
}
