//! # Resolution Outcomes
//!
//! The classified result of one search request. Exactly one of four
//! terminal shapes: an exact match, a ranked list of fuzzy candidates,
//! nothing at all, or a failure somewhere between the caller and the
//! service.

use std::fmt;

use crate::item::ResultItem;

/// Classified result of a name search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// `code == 200` with exactly one item.
    Exact(ResultItem),
    /// `code == 101` with at least one candidate, in service rank order.
    /// Never longer than the requested result size.
    Fuzzy(Vec<ResultItem>),
    /// `code == 101` with no candidates.
    NotFound,
    /// The request failed or the response could not be classified.
    ServiceError(ServiceFailure),
}

impl ResolutionOutcome {
    /// Short label used in log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Exact(_) => "exact",
            Self::Fuzzy(_) => "fuzzy",
            Self::NotFound => "not_found",
            Self::ServiceError(_) => "service_error",
        }
    }
}

/// Why a search did not produce a usable response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceFailure {
    /// Connection failure, timeout, or any other transport-level error.
    Transport {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// The service answered with a non-2xx HTTP status.
    HttpStatus {
        /// The HTTP status code.
        status: u16,
    },
    /// The body was unreadable, or carried a `code` this client does not
    /// recognize.
    Api {
        /// The body's `code` field, when one could be read.
        code: Option<i64>,
        /// The body's `message` field, or a parse diagnostic.
        message: String,
    },
}

impl fmt::Display for ServiceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { reason } => write!(f, "transport error: {reason}"),
            Self::HttpStatus { status } => write!(f, "HTTP status {status}"),
            Self::Api {
                code: Some(code),
                message,
            } => write!(f, "unexpected response code={code}: {message}"),
            Self::Api {
                code: None,
                message,
            } => write!(f, "malformed response: {message}"),
        }
    }
}
