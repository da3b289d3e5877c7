//! Search response envelope and outcome classification.
//!
//! ## Wire Shape
//!
//! ```json
//! { "code": 200, "message": "OK", "data": [ {"name": .., "hash": .., "type": .., "content": ..} ] }
//! ```
//!
//! | `code` | `data`            | Outcome |
//! |--------|-------------------|---------|
//! | 200    | exactly one item  | `Exact` |
//! | 101    | null or `[]`      | `NotFound` |
//! | 101    | one or more items | `Fuzzy` (truncated to the requested size) |
//! | other  | anything          | `ServiceError(code, message)` |
//!
//! Classification happens in two stages. The envelope is read first so
//! that `code` and `message` survive even when `data` is malformed; the
//! items are then parsed strictly.

use arona_core::{ResolutionOutcome, ResultItem, SearchMethod, ServiceFailure};
use serde::{Deserialize, Serialize};

/// Exact match.
pub const CODE_EXACT: i64 = 200;

/// Fuzzy match (zero or more candidates).
pub const CODE_FUZZY: i64 = 101;

/// Query parameters of `GET {api_base}/image`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchParams<'a> {
    pub name: &'a str,
    pub size: u32,
    pub method: SearchMethod,
}

/// Top-level response body. `data` stays untyped until the code is known.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchEnvelope {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Parse a raw response body and classify it.
pub fn classify_body(body: &str, size: u32) -> ResolutionOutcome {
    match serde_json::from_str::<SearchEnvelope>(body) {
        Ok(envelope) => classify(envelope, size),
        Err(e) => ResolutionOutcome::ServiceError(ServiceFailure::Api {
            code: None,
            message: format!("unreadable response body: {e}"),
        }),
    }
}

/// Classify a decoded envelope.
pub fn classify(envelope: SearchEnvelope, size: u32) -> ResolutionOutcome {
    let SearchEnvelope {
        code,
        message,
        data,
    } = envelope;
    let message = message.unwrap_or_default();

    let malformed = |reason: String| {
        ResolutionOutcome::ServiceError(ServiceFailure::Api {
            code: Some(code),
            message: reason,
        })
    };

    match code {
        CODE_EXACT => match parse_items(data) {
            Ok(mut items) if items.len() == 1 => ResolutionOutcome::Exact(items.remove(0)),
            Ok(items) => malformed(format!(
                "exact match carried {} items; {message}",
                items.len()
            )),
            Err(e) => malformed(format!("malformed data: {e}")),
        },
        CODE_FUZZY => match parse_items(data) {
            Ok(items) if items.is_empty() => ResolutionOutcome::NotFound,
            Ok(mut items) => {
                let limit = size as usize;
                if items.len() > limit {
                    tracing::warn!(
                        received = items.len(),
                        limit,
                        "fuzzy result list longer than requested size, truncating"
                    );
                    items.truncate(limit);
                }
                if items.is_empty() {
                    ResolutionOutcome::NotFound
                } else {
                    ResolutionOutcome::Fuzzy(items)
                }
            }
            Err(e) => malformed(format!("malformed data: {e}")),
        },
        _ => ResolutionOutcome::ServiceError(ServiceFailure::Api {
            code: Some(code),
            message,
        }),
    }
}

/// `null` and a missing field both read as an empty list.
fn parse_items(data: Option<serde_json::Value>) -> Result<Vec<ResultItem>, serde_json::Error> {
    match data {
        None | Some(serde_json::Value::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value),
    }
}
