//! Endpoint output shapes and the response assembler.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::lookup::LookupResult;

/// Transparency note attached to every successful lookup.
pub const LOOKUP_NOTE: &str = "This result is based on an internal mapping (city-first, then state defaults). For official utility assignments consult the utility or local distribution company.";

/// Successful lookup body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LookupResponse {
    /// Always `true`.
    pub ok: bool,
    /// Matched place and providers.
    pub data: LookupResult,
    /// Which city/state the answer was derived from.
    pub meta: String,
    /// How the answer was produced.
    pub note: String,
}

/// Error body for every non-200 lookup response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`.
    pub ok: bool,
    /// `Invalid ZIP`, `ZIP not found` or `lookup_failed`.
    pub error: String,
}

impl ErrorResponse {
    /// Create an error body.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

/// Wrap a lookup result into the endpoint's output shape.
pub fn assemble(result: LookupResult) -> LookupResponse {
    let meta = format!(
        "Determined from city: {}, state: {}.",
        or_unknown(&result.city),
        or_unknown(&result.state)
    );

    LookupResponse {
        ok: true,
        data: result,
        meta,
        note: LOOKUP_NOTE.to_string(),
    }
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() {
        "unknown"
    } else {
        value
    }
}
